use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub jackpots: JackpotsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

/// 实时事件通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// 广播缓冲区大小，慢订阅者超出后丢弃旧事件
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JackpotsConfig {
    /// 名称索引与数据库全量对账的间隔（秒）
    pub directory_refresh_secs: u64,
}

impl Default for JackpotsConfig {
    fn default() -> Self {
        Self {
            directory_refresh_secs: 300,
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    8
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str)
                    .with_context(|| format!("failed to parse config file {config_path}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    anyhow!("DATABASE_URL is not set and no config file was found at {config_path}")
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 5000u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_timeout_secs: get_env_parse(
                            "DB_CONNECT_TIMEOUT_SECS",
                            default_connect_timeout_secs(),
                        ),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                    },
                    events: EventsConfig::default(),
                    jackpots: JackpotsConfig::default(),
                }
            }
            Err(e) => {
                return Err(anyhow!("failed to read config file {config_path}: {e}"));
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    // 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.database.connect_timeout_secs = n;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("EVENTS_CHANNEL_CAPACITY")
            && let Ok(n) = v.parse()
        {
            self.events.channel_capacity = n;
        }
        if let Ok(v) = env::var("JACKPOT_DIRECTORY_REFRESH_SECS")
            && let Ok(n) = v.parse()
        {
            self.jackpots.directory_refresh_secs = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml() {
        let raw = r#"
[server]
host = "127.0.0.1"
port = 5000

[database]
url = "postgres://localhost/jackpots"
max_connections = 5

[jwt]
secret = "secret"
access_token_expires_in = 3600
"#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.connect_timeout_secs, 8);
        assert_eq!(config.events.channel_capacity, 1024);
        assert_eq!(config.jackpots.directory_refresh_secs, 300);
    }

    #[test]
    fn test_parse_full_toml() {
        let raw = r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
url = "postgres://localhost/jackpots"
max_connections = 20
connect_timeout_secs = 3

[jwt]
secret = "secret"
access_token_expires_in = 60

[events]
channel_capacity = 16

[jackpots]
directory_refresh_secs = 30
"#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.connect_timeout_secs, 3);
        assert_eq!(config.events.channel_capacity, 16);
        assert_eq!(config.jackpots.directory_refresh_secs, 30);
    }
}

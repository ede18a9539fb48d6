use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

/// 共享连接池句柄
pub type DbPool = Arc<DatabaseConnection>;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        // 连接池获取超时会被视为资源耗尽 (429)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(&**pool, None).await?;
    Ok(())
}

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use jackpot_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    events::EventHub,
    extractor_config, handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    store::PgJackpotStore,
    swagger::swagger_config,
    tasks,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().context("failed to load configuration")?;

    let pool = create_pool(&config.database)
        .await
        .context("failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expires_in);
    let event_hub = EventHub::new(config.events.channel_capacity);

    // 奖池：存储 + 名称索引 + 事件
    let jackpot_store = Arc::new(PgJackpotStore::new(pool.clone()));
    let jackpot_service =
        JackpotService::new(jackpot_store, JackpotDirectory::new(), event_hub.clone());
    let indexed = jackpot_service
        .rebuild_directory()
        .await
        .context("failed to build jackpot directory")?;
    log::info!("Jackpot directory built with {indexed} entries");

    // 持有数据库连接的服务只构建一次，各 worker 共享同一个 Data (Arc)
    let casino_service = web::Data::new(CasinoService::new(pool.clone()));
    let casino_group_service = web::Data::new(CasinoGroupService::new(pool.clone()));
    let machine_group_service = web::Data::new(MachineGroupService::new(pool.clone()));
    let machine_service = web::Data::new(MachineService::new(pool.clone()));
    let user_service = web::Data::new(UserService::new(pool.clone()));
    let player_service = web::Data::new(PlayerService::new(pool.clone()));
    let transaction_service = web::Data::new(TransactionService::new(pool.clone()));

    tasks::spawn_all(
        jackpot_service.clone(),
        config.jackpots.directory_refresh_secs,
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .configure(extractor_config)
            .app_data(web::Data::new(jackpot_service.clone()))
            .app_data(web::Data::new(event_hub.clone()))
            .app_data(casino_service.clone())
            .app_data(casino_group_service.clone())
            .app_data(machine_group_service.clone())
            .app_data(machine_service.clone())
            .app_data(user_service.clone())
            .app_data(player_service.clone())
            .app_data(transaction_service.clone())
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::floor_config)
                    .configure(handlers::jackpot_config)
                    .configure(handlers::casino_config)
                    .configure(handlers::casino_group_config)
                    .configure(handlers::machine_group_config)
                    .configure(handlers::machine_config)
                    .configure(handlers::user_config)
                    .configure(handlers::player_config)
                    .configure(handlers::transaction_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}

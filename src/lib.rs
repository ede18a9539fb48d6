pub mod config;
pub mod database;
pub mod engine;
pub mod entities;
pub mod error;
pub mod events;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;
pub mod swagger;
pub mod tasks;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid JSON body: {err}")).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid path parameter: {err}")).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid query string: {err}")).into()
}

/// 请求体 / 路径 / 查询参数解析失败统一返回 400 VALIDATION_ERROR
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

use crate::database::is_resource_exhausted;
use crate::engine::EngineError;
use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    /// 存储资源耗尽（连接池超时 / 配额不足），调用方应稍后重试
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Player level {0} is not allowed for this jackpot")]
    LevelNotAllowed(i32),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if is_resource_exhausted(&err) {
            AppError::PersistenceUnavailable(err.to_string())
        } else {
            AppError::DatabaseError(err)
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Jackpot {id} not found")),
            StoreError::Duplicate(msg) => AppError::Conflict(msg),
            StoreError::VersionMismatch(id) => {
                AppError::Conflict(format!("Jackpot {id} was modified concurrently"))
            }
            StoreError::Exhausted(msg) => AppError::PersistenceUnavailable(msg),
            StoreError::Backend(msg) => AppError::StorageError(msg),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::LevelNotAllowed(level) => AppError::LevelNotAllowed(level),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    "Invalid access token".to_string(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::LevelNotAllowed(_) => {
                log::warn!("{self}");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "LEVEL_NOT_ALLOWED",
                    "Player level not allowed for this jackpot".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "CONFLICT",
                    msg.clone(),
                )
            }
            AppError::PersistenceUnavailable(msg) => {
                log::warn!("Persistence unavailable: {msg}");
                (
                    actix_web::http::StatusCode::TOO_MANY_REQUESTS,
                    "PERSISTENCE_UNAVAILABLE",
                    "Quota exceeded, please try again later".to_string(),
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            AppError::StorageError(msg) => {
                log::error!("Storage error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::LevelNotAllowed(3).error_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::PersistenceUnavailable("pool timeout".into())
                .error_response()
                .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::NotFound("x".into()).error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::StorageError("disk".into())
                .error_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            AppError::from(StoreError::Exhausted("quota".into())),
            AppError::PersistenceUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Duplicate("name".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::NotFound("jp-1".into())),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_pool_exhaustion_maps_to_429() {
        use sea_orm::{ConnAcquireErr, RuntimeErr, SqlxError};

        let timeout = AppError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert_eq!(
            timeout.error_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );

        let pool = AppError::from(DbErr::Query(RuntimeErr::SqlxError(SqlxError::PoolTimedOut)));
        assert!(matches!(pool, AppError::PersistenceUnavailable(_)));
    }

    #[test]
    fn test_db_err_is_failure_by_default() {
        let err = AppError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}

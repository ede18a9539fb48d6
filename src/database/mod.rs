pub mod connection;

pub use connection::*;

use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr, SqlxError};

/// 判断数据库错误是否属于“资源耗尽”类（可重试）:
/// - 连接池获取超时
/// - PostgreSQL SQLSTATE 53xxx (insufficient resources / too many connections)
pub fn is_resource_exhausted(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => true,
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => is_sqlx_exhausted(e),
        _ => false,
    }
}

fn is_sqlx_exhausted(err: &SqlxError) -> bool {
    match err {
        SqlxError::PoolTimedOut => true,
        SqlxError::Database(db_err) => db_err
            .code()
            .map(|code| code.starts_with("53"))
            .unwrap_or(false),
        _ => false,
    }
}

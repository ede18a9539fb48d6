//! 奖池持久化接口。
//!
//! 所有写入都通过 [`JackpotStore::save`] 的版本号条件写入完成：同一奖池同一版本
//! 只有一个写入能成功，失败方收到 [`StoreError::VersionMismatch`] 后重新读取。

use async_trait::async_trait;
use thiserror::Error;

use crate::engine::Jackpot;

pub mod memory;
pub mod postgres;

pub use memory::MemoryJackpotStore;
pub use postgres::PgJackpotStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("jackpot {0} not found")]
    NotFound(String),

    #[error("jackpot {0} was modified by another writer")]
    VersionMismatch(String),

    #[error("duplicate jackpot: {0}")]
    Duplicate(String),

    /// 资源耗尽（配额 / 连接池），可重试
    #[error("storage exhausted: {0}")]
    Exhausted(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait JackpotStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Jackpot>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Jackpot>, StoreError>;

    /// 按名称排序返回；`active_only` 时仅返回激活的奖池
    async fn list(&self, active_only: bool) -> Result<Vec<Jackpot>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// 新建奖池，id 或名称重复返回 `Duplicate`
    async fn insert(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError>;

    /// 条件写入：仅当存储中的 version 等于 `jackpot.version` 时成功，
    /// 返回 version + 1 后的记录
    async fn save(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError>;
}

//! 奖池名称 -> id 索引。
//!
//! 启动时全量构建，创建/改名时增量维护，后台任务定期对账；
//! 查找未命中时由调用方按名称点查并回填。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::engine::Jackpot;

#[derive(Clone, Default)]
pub struct JackpotDirectory {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl JackpotDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn resolve(&self, name: &str) -> Option<String> {
        self.entries.read().await.get(name).cloned()
    }

    pub async fn record(&self, name: &str, id: &str) {
        self.entries
            .write()
            .await
            .insert(name.to_string(), id.to_string());
    }

    pub async fn forget(&self, name: &str) {
        self.entries.write().await.remove(name);
    }

    /// 用完整奖池列表替换索引
    pub async fn rebuild(&self, jackpots: &[Jackpot]) {
        let fresh: HashMap<String, String> = jackpots
            .iter()
            .map(|jp| (jp.name.clone(), jp.id.clone()))
            .collect();
        *self.entries.write().await = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_resolve_forget() {
        let dir = JackpotDirectory::new();
        assert_eq!(dir.resolve("Mega").await, None);

        dir.record("Mega", "jp-1").await;
        assert_eq!(dir.resolve("Mega").await.as_deref(), Some("jp-1"));

        dir.forget("Mega").await;
        assert_eq!(dir.resolve("Mega").await, None);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_entries() {
        let dir = JackpotDirectory::new();
        dir.record("Stale", "jp-0").await;

        dir.rebuild(&[
            Jackpot::new("jp-1", "Mega", 0, 100),
            Jackpot::new("jp-2", "Mini", 0, 100),
        ])
        .await;

        assert_eq!(dir.resolve("Mega").await.as_deref(), Some("jp-1"));
        assert_eq!(dir.resolve("Stale").await, None);
        assert_eq!(dir.resolve("Mini").await.as_deref(), Some("jp-2"));
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{JackpotStore, StoreError};
use crate::engine::Jackpot;

/// 进程内奖池存储，语义与 PostgreSQL 实现一致（名称唯一、版本号条件写入）
#[derive(Default)]
pub struct MemoryJackpotStore {
    records: RwLock<HashMap<String, Jackpot>>,
}

impl MemoryJackpotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jackpots(jackpots: impl IntoIterator<Item = Jackpot>) -> Self {
        let records = jackpots
            .into_iter()
            .map(|jp| (jp.id.clone(), jp))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

fn name_taken(records: &HashMap<String, Jackpot>, name: &str, except_id: &str) -> bool {
    records
        .values()
        .any(|jp| jp.name == name && jp.id != except_id)
}

#[async_trait]
impl JackpotStore for MemoryJackpotStore {
    async fn get(&self, id: &str) -> Result<Option<Jackpot>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Jackpot>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|jp| jp.name == name)
            .cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Jackpot>, StoreError> {
        let mut jackpots: Vec<Jackpot> = self
            .records
            .read()
            .await
            .values()
            .filter(|jp| !active_only || jp.active)
            .cloned()
            .collect();
        jackpots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(jackpots)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&jackpot.id) {
            return Err(StoreError::Duplicate(format!(
                "Jackpot id {} already exists",
                jackpot.id
            )));
        }
        if name_taken(&records, &jackpot.name, &jackpot.id) {
            return Err(StoreError::Duplicate(format!(
                "Jackpot name {} already exists",
                jackpot.name
            )));
        }

        let now = Utc::now();
        let mut stored = jackpot.clone();
        stored.version = 0;
        stored.created_at = now;
        stored.updated_at = now;
        records.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn save(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
        let mut records = self.records.write().await;
        let current = records
            .get(&jackpot.id)
            .ok_or_else(|| StoreError::NotFound(jackpot.id.clone()))?;
        if current.version != jackpot.version {
            return Err(StoreError::VersionMismatch(jackpot.id.clone()));
        }
        if name_taken(&records, &jackpot.name, &jackpot.id) {
            return Err(StoreError::Duplicate(format!(
                "Jackpot name {} already exists",
                jackpot.name
            )));
        }

        let mut stored = jackpot.clone();
        stored.version += 1;
        stored.updated_at = Utc::now();
        records.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let store = MemoryJackpotStore::new();
        store
            .insert(&Jackpot::new("jp-1", "Mega", 0, 10000))
            .await
            .unwrap();

        let same_id = store.insert(&Jackpot::new("jp-1", "Other", 0, 10000)).await;
        assert!(matches!(same_id, Err(StoreError::Duplicate(_))));

        let same_name = store.insert(&Jackpot::new("jp-2", "Mega", 0, 10000)).await;
        assert!(matches!(same_name, Err(StoreError::Duplicate(_))));

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_is_conditional_on_version() {
        let store = MemoryJackpotStore::new();
        let created = store
            .insert(&Jackpot::new("jp-1", "Mega", 0, 10000))
            .await
            .unwrap();

        let mut first = created.clone();
        first.amount_cents = 1000;
        let saved = store.save(&first).await.unwrap();
        assert_eq!(saved.version, 1);

        // 基于旧版本的第二次写入必须失败
        let mut stale = created.clone();
        stale.amount_cents = 2000;
        assert_eq!(
            store.save(&stale).await.unwrap_err(),
            StoreError::VersionMismatch("jp-1".into())
        );

        let current = store.get("jp-1").await.unwrap().unwrap();
        assert_eq!(current.amount_cents, 1000);
    }

    #[tokio::test]
    async fn test_save_missing() {
        let store = MemoryJackpotStore::new();
        let err = store
            .save(&Jackpot::new("nope", "Nope", 0, 1))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("nope".into()));
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let mut idle = Jackpot::new("jp-2", "Alpha", 0, 100);
        idle.active = false;
        let store = MemoryJackpotStore::with_jackpots([
            Jackpot::new("jp-1", "Zeta", 0, 100),
            idle,
            Jackpot::new("jp-3", "Beta", 0, 100),
        ]);

        let all: Vec<String> = store
            .list(false)
            .await
            .unwrap()
            .into_iter()
            .map(|jp| jp.name)
            .collect();
        assert_eq!(all, vec!["Alpha", "Beta", "Zeta"]);

        let active = store.list(true).await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|jp| jp.active));
    }
}

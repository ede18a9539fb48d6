//! 奖池业务：spin 与后台管理操作。
//!
//! 所有写入都走版本号条件写入。冲突时重新读取最新状态并重新计算，
//! 最多尝试 [`MAX_WRITE_ATTEMPTS`] 次，仍失败则返回 `PersistenceUnavailable`。
//! 派奖事件只在写入成功后广播。

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::engine::{Jackpot, evaluate_spin};
use crate::error::{AppError, AppResult};
use crate::events::{EventHub, JACKPOT_WON_EVENT, JackpotWonEvent};
use crate::models::*;
use crate::services::JackpotDirectory;
use crate::store::{JackpotStore, StoreError};
use crate::utils::format_cents;

pub const MAX_WRITE_ATTEMPTS: usize = 5;

fn normalize_levels(mut levels: Vec<i32>) -> Vec<i32> {
    levels.sort_unstable();
    levels.dedup();
    levels
}

fn not_found(key: &str) -> AppError {
    AppError::NotFound(format!("Jackpot {key} not found"))
}

fn contention(key: &str) -> AppError {
    AppError::PersistenceUnavailable(format!(
        "jackpot {key} still conflicting after {MAX_WRITE_ATTEMPTS} attempts"
    ))
}

#[derive(Clone)]
pub struct JackpotService {
    store: Arc<dyn JackpotStore>,
    directory: JackpotDirectory,
    events: EventHub,
}

impl JackpotService {
    pub fn new(store: Arc<dyn JackpotStore>, directory: JackpotDirectory, events: EventHub) -> Self {
        Self {
            store,
            directory,
            events,
        }
    }

    /// 用存储中的全部奖池重建名称索引
    pub async fn rebuild_directory(&self) -> AppResult<usize> {
        let all = self.store.list(false).await?;
        self.directory.rebuild(&all).await;
        Ok(all.len())
    }

    /// 按名称读取最新状态，索引过期或未命中时按名称点查并修复索引
    async fn load_by_name(&self, name: &str) -> AppResult<Jackpot> {
        if let Some(id) = self.directory.resolve(name).await {
            if let Some(jp) = self.store.get(&id).await?
                && jp.name == name
            {
                return Ok(jp);
            }
            self.directory.forget(name).await;
        }

        let jp = self
            .store
            .find_by_name(name)
            .await?
            .ok_or_else(|| not_found(name))?;
        self.directory.record(&jp.name, &jp.id).await;
        Ok(jp)
    }

    async fn load(&self, id: &str) -> AppResult<Jackpot> {
        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// 读取 - 修改 - 条件写入，冲突时重试。返回 (修改前, 写入后)
    async fn update_with<F>(&self, id: &str, mut apply: F) -> AppResult<(Jackpot, Jackpot)>
    where
        F: FnMut(&mut Jackpot) + Send,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let before = self.load(id).await?;
            let mut next = before.clone();
            apply(&mut next);
            match self.store.save(&next).await {
                Ok(saved) => return Ok((before, saved)),
                Err(StoreError::VersionMismatch(_)) => {
                    warn!("Write to jackpot {id} conflicted (attempt {attempt}/{MAX_WRITE_ATTEMPTS})");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(contention(id))
    }

    /// 执行一次 spin
    pub async fn spin(&self, name: &str, request: SpinRequest) -> AppResult<SpinResponse> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self.load_by_name(name).await?;

            let decision = {
                let mut rng = rand::thread_rng();
                evaluate_spin(&current, request.amount, request.player_level, &mut rng)
            };
            let decision = match decision {
                Ok(d) => d,
                Err(e) => {
                    warn!("Spin on {name} rejected: {e}");
                    return Err(e.into());
                }
            };

            match self.store.save(&decision.jackpot).await {
                Ok(_) => {
                    if let Some(won) = &decision.won {
                        info!(
                            "Jackpot {} ({}) paid out {}",
                            won.name,
                            won.jackpot_id,
                            format_cents(won.amount_cents)
                        );
                        self.events.emit(
                            JACKPOT_WON_EVENT,
                            &JackpotWonEvent::new(won.name.as_str(), won.amount_cents),
                        );
                    }
                    return Ok(SpinResponse::from(&decision));
                }
                Err(StoreError::VersionMismatch(_)) => {
                    warn!("Spin on {name} conflicted (attempt {attempt}/{MAX_WRITE_ATTEMPTS})");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(contention(name))
    }

    pub async fn create(&self, request: CreateJackpotRequest) -> AppResult<JackpotResponse> {
        request.validate()?;

        let name = request.name.trim().to_string();
        if self.store.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Jackpot with name {name} already exists"
            )));
        }

        let id = request
            .id
            .map(|id| id.trim().to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut jackpot = Jackpot::new(id, name, request.amount, request.max_amount);
        jackpot.allowed_levels = normalize_levels(request.allowed_levels);
        jackpot.casino_id = request.casino_id;
        jackpot.machine_id = request.machine_id;

        let created = self.store.insert(&jackpot).await?;
        self.directory.record(&created.name, &created.id).await;
        info!("Jackpot {} ({}) created", created.name, created.id);
        Ok(created.into())
    }

    /// 部分更新
    pub async fn update(&self, id: &str, request: UpdateJackpotRequest) -> AppResult<JackpotResponse> {
        request.validate()?;

        let new_name = request.name.as_deref().map(str::trim).map(str::to_string);
        if let Some(name) = &new_name
            && let Some(other) = self.store.find_by_name(name).await?
            && other.id != id
        {
            return Err(AppError::Conflict(format!(
                "Jackpot with name {name} already exists"
            )));
        }

        let levels = request.allowed_levels.map(normalize_levels);
        let (before, saved) = self
            .update_with(id, |jp| {
                if let Some(name) = &new_name {
                    jp.name = name.clone();
                }
                if let Some(amount) = request.amount {
                    jp.amount_cents = amount;
                }
                if let Some(max) = request.max_amount {
                    jp.max_amount_cents = max;
                }
                if let Some(active) = request.active {
                    jp.active = active;
                }
                if let Some(levels) = &levels {
                    jp.allowed_levels = levels.clone();
                }
                if let Some(casino_id) = &request.casino_id {
                    jp.casino_id = Some(casino_id.clone());
                }
                if let Some(machine_id) = &request.machine_id {
                    jp.machine_id = Some(machine_id.clone());
                }
            })
            .await?;

        if before.name != saved.name {
            self.directory.forget(&before.name).await;
            self.directory.record(&saved.name, &saved.id).await;
            info!("Jackpot {id} renamed from {} to {}", before.name, saved.name);
        }
        Ok(saved.into())
    }

    pub async fn set_amount(&self, id: &str, request: SetAmountRequest) -> AppResult<JackpotResponse> {
        let (_, saved) = self
            .update_with(id, |jp| jp.amount_cents = request.amount)
            .await?;
        info!("Jackpot {id} amount set to {}", format_cents(saved.amount_cents));
        Ok(saved.into())
    }

    pub async fn set_trigger(&self, id: &str, request: SetTriggerRequest) -> AppResult<JackpotResponse> {
        request.validate()?;
        let (_, saved) = self
            .update_with(id, |jp| jp.max_amount_cents = request.max_amount)
            .await?;
        info!("Jackpot {id} trigger set to {}", format_cents(saved.max_amount_cents));
        Ok(saved.into())
    }

    pub async fn set_levels(&self, id: &str, request: SetLevelsRequest) -> AppResult<JackpotResponse> {
        let levels = normalize_levels(request.allowed_levels);
        let (_, saved) = self
            .update_with(id, |jp| jp.allowed_levels = levels.clone())
            .await?;
        Ok(saved.into())
    }

    pub async fn activate(&self, id: &str) -> AppResult<JackpotResponse> {
        let (_, saved) = self.update_with(id, |jp| jp.active = true).await?;
        info!("Jackpot {id} activated");
        Ok(saved.into())
    }

    pub async fn deactivate(&self, id: &str) -> AppResult<JackpotResponse> {
        let (_, saved) = self.update_with(id, |jp| jp.active = false).await?;
        info!("Jackpot {id} deactivated");
        Ok(saved.into())
    }

    /// 金额清零、置为未激活、贡献次数清零
    pub async fn reset(&self, id: &str) -> AppResult<JackpotResponse> {
        let (_, saved) = self.update_with(id, Jackpot::reset).await?;
        info!("Jackpot {id} reset");
        Ok(saved.into())
    }

    pub async fn get(&self, id: &str) -> AppResult<JackpotResponse> {
        Ok(self.load(id).await?.into())
    }

    pub async fn amount(&self, id: &str) -> AppResult<JackpotAmountResponse> {
        let jp = self.load(id).await?;
        Ok(JackpotAmountResponse {
            jackpot_amount: format_cents(jp.amount_cents),
        })
    }

    pub async fn list(&self, active_only: bool) -> AppResult<Vec<JackpotResponse>> {
        let all = self.store.list(active_only).await?;
        Ok(all.into_iter().map(JackpotResponse::from).collect())
    }

    pub async fn count(&self) -> AppResult<CountResponse> {
        Ok(CountResponse {
            count: self.store.count().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpinOutcome;
    use crate::store::MemoryJackpotStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 前 `conflicts` 次写入返回版本冲突，或者固定返回某个错误
    struct FaultyStore {
        inner: MemoryJackpotStore,
        conflicts: AtomicUsize,
        fail_with: Option<StoreError>,
        saves: AtomicUsize,
    }

    impl FaultyStore {
        fn new(jackpots: Vec<Jackpot>, conflicts: usize, fail_with: Option<StoreError>) -> Self {
            Self {
                inner: MemoryJackpotStore::with_jackpots(jackpots),
                conflicts: AtomicUsize::new(conflicts),
                fail_with,
                saves: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JackpotStore for FaultyStore {
        async fn get(&self, id: &str) -> Result<Option<Jackpot>, StoreError> {
            self.inner.get(id).await
        }
        async fn find_by_name(&self, name: &str) -> Result<Option<Jackpot>, StoreError> {
            self.inner.find_by_name(name).await
        }
        async fn list(&self, active_only: bool) -> Result<Vec<Jackpot>, StoreError> {
            self.inner.list(active_only).await
        }
        async fn count(&self) -> Result<u64, StoreError> {
            self.inner.count().await
        }
        async fn insert(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
            self.inner.insert(jackpot).await
        }
        async fn save(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let remaining = self.conflicts.load(Ordering::SeqCst);
            if remaining > 0 {
                self.conflicts.store(remaining - 1, Ordering::SeqCst);
                return Err(StoreError::VersionMismatch(jackpot.id.clone()));
            }
            self.inner.save(jackpot).await
        }
    }

    fn jackpot(amount: i64, max: i64, active: bool) -> Jackpot {
        let mut jp = Jackpot::new("jp-1", "Mega", amount, max);
        jp.active = active;
        jp.allowed_levels = vec![1, 2];
        jp
    }

    fn service_with(store: Arc<dyn JackpotStore>) -> (JackpotService, EventHub) {
        let events = EventHub::new(16);
        (
            JackpotService::new(store, JackpotDirectory::new(), events.clone()),
            events,
        )
    }

    fn spin_request(amount: i64, player_level: i32) -> SpinRequest {
        SpinRequest {
            amount,
            player_level,
        }
    }

    #[tokio::test]
    async fn test_spin_contribution() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(9500, 10000, true)]));
        let (service, _) = service_with(store.clone());

        let res = service.spin("Mega", spin_request(100, 1)).await.unwrap();
        assert_eq!(res.outcome, SpinOutcome::Contributed);
        assert!(res.in_jackpot);
        assert!(!res.won_jackpot);
        assert_eq!(res.payout, "0.00");
        assert_eq!(res.amount_won, res.contribution);

        let stored = store.get("jp-1").await.unwrap().unwrap();
        assert!((10500..=11040).contains(&stored.amount_cents));
        assert_eq!(format_cents(stored.amount_cents), res.jackpot_amount);
        assert_eq!(stored.contributions, 1);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_spin_payout_emits_one_event() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(10000, 10000, true)]));
        let (service, events) = service_with(store.clone());
        let mut rx = events.subscribe();

        let res = service.spin("Mega", spin_request(100, 2)).await.unwrap();
        assert_eq!(res.outcome, SpinOutcome::JackpotPaid);
        assert_eq!(res.payout, "100.00");
        assert_eq!(res.amount_won, "100.00");
        assert_eq!(res.jackpot_amount, "0.00");
        assert!(res.won_jackpot);
        assert!(!res.in_jackpot);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, JACKPOT_WON_EVENT);
        assert_eq!(event.data, r#"{"type":"Mega","amount_won":"100.00"}"#);
        assert!(rx.try_recv().is_err());

        let stored = store.get("jp-1").await.unwrap().unwrap();
        assert_eq!(stored.amount_cents, 0);
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_spin_reactivation() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(9000, 10000, false)]));
        let (service, _) = service_with(store.clone());

        let res = service.spin("Mega", spin_request(1500, 1)).await.unwrap();
        assert_eq!(res.outcome, SpinOutcome::Reactivated);
        assert_eq!(res.amount_won, "0.00");
        assert_eq!(res.jackpot_amount, "90.00");
        assert!(res.in_jackpot);
        assert!(!res.won_jackpot);
        assert!(store.get("jp-1").await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_spin_level_not_allowed_changes_nothing() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(10000, 10000, true)]));
        let (service, events) = service_with(store.clone());
        let mut rx = events.subscribe();

        let err = service.spin("Mega", spin_request(100, 7)).await.unwrap_err();
        assert!(matches!(err, AppError::LevelNotAllowed(7)));

        let stored = store.get("jp-1").await.unwrap().unwrap();
        assert_eq!(stored.amount_cents, 10000);
        assert_eq!(stored.version, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_spin_unknown_jackpot() {
        let (service, _) = service_with(Arc::new(MemoryJackpotStore::new()));
        let err = service.spin("Nope", spin_request(100, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_spin_repairs_directory_on_miss() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(0, 10000, true)]));
        let (service, _) = service_with(store);
        assert_eq!(service.directory.resolve("Mega").await, None);

        service.spin("Mega", spin_request(100, 1)).await.unwrap();
        assert_eq!(service.directory.resolve("Mega").await.as_deref(), Some("jp-1"));
    }

    #[tokio::test]
    async fn test_spin_retries_after_conflict() {
        let store = Arc::new(FaultyStore::new(vec![jackpot(0, 10000, true)], 2, None));
        let (service, _) = service_with(store.clone());

        let res = service.spin("Mega", spin_request(100, 1)).await.unwrap();
        assert_eq!(res.outcome, SpinOutcome::Contributed);
        assert_eq!(store.saves.load(Ordering::SeqCst), 3);
        assert_eq!(store.get("jp-1").await.unwrap().unwrap().contributions, 1);
    }

    #[tokio::test]
    async fn test_spin_gives_up_after_max_attempts() {
        let store = Arc::new(FaultyStore::new(
            vec![jackpot(10000, 10000, true)],
            usize::MAX,
            None,
        ));
        let (service, events) = service_with(store.clone());
        let mut rx = events.subscribe();

        let err = service.spin("Mega", spin_request(100, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceUnavailable(_)));
        assert_eq!(store.saves.load(Ordering::SeqCst), MAX_WRITE_ATTEMPTS);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_spin_failed_write_emits_nothing() {
        let store = Arc::new(FaultyStore::new(
            vec![jackpot(10000, 10000, true)],
            0,
            Some(StoreError::Exhausted("quota".into())),
        ));
        let (service, events) = service_with(store.clone());
        let mut rx = events.subscribe();

        let err = service.spin("Mega", spin_request(100, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceUnavailable(_)));
        assert!(rx.try_recv().is_err());
        assert_eq!(store.get("jp-1").await.unwrap().unwrap().amount_cents, 10000);

        let store = Arc::new(FaultyStore::new(
            vec![jackpot(10000, 10000, true)],
            0,
            Some(StoreError::Backend("disk".into())),
        ));
        let (service, _) = service_with(store);
        let err = service.spin("Mega", spin_request(100, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_spins_lose_no_updates() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(0, i64::MAX, true)]));
        let (service, _) = service_with(store.clone());

        let mut handles = Vec::new();
        for _ in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.spin("Mega", spin_request(100, 1)).await
            }));
        }

        let mut successes = 0;
        let mut contributed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(res) => {
                    successes += 1;
                    contributed += crate::utils::parse_cents(&res.contribution).unwrap();
                }
                Err(e) => assert!(matches!(e, AppError::PersistenceUnavailable(_))),
            }
        }

        // 每一轮冲突中至少有一个写入成功
        assert!(successes > 0);
        let stored = store.get("jp-1").await.unwrap().unwrap();
        assert_eq!(stored.contributions, successes);
        assert_eq!(stored.amount_cents, contributed);
        assert_eq!(stored.version, successes);
    }

    fn create_request(name: &str) -> CreateJackpotRequest {
        CreateJackpotRequest {
            id: None,
            name: name.to_string(),
            amount: 500,
            max_amount: 100000,
            allowed_levels: vec![3, 1, 3],
            casino_id: None,
            machine_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_seeds_state_and_directory() {
        let (service, _) = service_with(Arc::new(MemoryJackpotStore::new()));

        let created = service.create(create_request("Grand")).await.unwrap();
        assert!(created.active);
        assert_eq!(created.contributions, 0);
        assert_eq!(created.amount, "5.00");
        assert_eq!(created.allowed_levels, vec![1, 3]);
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(
            service.directory.resolve("Grand").await.as_deref(),
            Some(created.id.as_str())
        );

        let dup = service.create(create_request("Grand")).await.unwrap_err();
        assert!(matches!(dup, AppError::Conflict(_)));
        assert_eq!(service.count().await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_rename_keeps_directory_consistent() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(0, 10000, true)]));
        let (service, _) = service_with(store);
        service.rebuild_directory().await.unwrap();

        let updated = service
            .update(
                "jp-1",
                UpdateJackpotRequest {
                    name: Some("Ultra".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ultra");

        assert!(service.spin("Ultra", spin_request(100, 1)).await.is_ok());
        let err = service.spin("Mega", spin_request(100, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let mut other = Jackpot::new("jp-2", "Mini", 0, 100);
        other.allowed_levels = vec![1];
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(0, 10000, true), other]));
        let (service, _) = service_with(store);

        let err = service
            .update(
                "jp-1",
                UpdateJackpotRequest {
                    name: Some("Mini".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_admin_actions() {
        let store = Arc::new(MemoryJackpotStore::with_jackpots([jackpot(7000, 10000, true)]));
        let (service, _) = service_with(store);

        let jp = service.deactivate("jp-1").await.unwrap();
        assert!(!jp.active);
        let jp = service.activate("jp-1").await.unwrap();
        assert!(jp.active);

        let jp = service
            .set_amount("jp-1", SetAmountRequest { amount: 12345 })
            .await
            .unwrap();
        assert_eq!(jp.amount, "123.45");
        assert_eq!(service.amount("jp-1").await.unwrap().jackpot_amount, "123.45");

        let jp = service
            .set_trigger("jp-1", SetTriggerRequest { max_amount: 50000 })
            .await
            .unwrap();
        assert_eq!(jp.max_amount, "500.00");

        let jp = service
            .set_levels(
                "jp-1",
                SetLevelsRequest {
                    allowed_levels: vec![5, 4, 5],
                },
            )
            .await
            .unwrap();
        assert_eq!(jp.allowed_levels, vec![4, 5]);

        let jp = service.reset("jp-1").await.unwrap();
        assert_eq!(jp.amount, "0.00");
        assert!(!jp.active);
        assert_eq!(jp.contributions, 0);
        assert_eq!(jp.version, 6);

        assert!(service.list(true).await.unwrap().is_empty());
        assert_eq!(service.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_action_on_missing_jackpot() {
        let (service, _) = service_with(Arc::new(MemoryJackpotStore::new()));
        assert!(matches!(
            service.reset("missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            service.set_trigger("missing", SetTriggerRequest { max_amount: 0 }).await.unwrap_err(),
            AppError::ValidationError(_)
        ));
    }
}

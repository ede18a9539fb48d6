use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use super::{JackpotStore, StoreError};
use crate::database::{DbPool, is_resource_exhausted};
use crate::engine::Jackpot;
use crate::entities::jackpot_entity as jackpots;

/// PostgreSQL 奖池存储 (sea-orm)
pub struct PgJackpotStore {
    db: DbPool,
}

impl PgJackpotStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

fn classify(err: DbErr) -> StoreError {
    if is_resource_exhausted(&err) {
        return StoreError::Exhausted(err.to_string());
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Duplicate(msg),
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl JackpotStore for PgJackpotStore {
    async fn get(&self, id: &str) -> Result<Option<Jackpot>, StoreError> {
        let model = jackpots::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await
            .map_err(classify)?;
        Ok(model.map(Jackpot::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Jackpot>, StoreError> {
        let model = jackpots::Entity::find()
            .filter(jackpots::Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(classify)?;
        Ok(model.map(Jackpot::from))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Jackpot>, StoreError> {
        let mut query = jackpots::Entity::find();
        if active_only {
            query = query.filter(jackpots::Column::Active.eq(true));
        }
        let models = query
            .order_by_asc(jackpots::Column::Name)
            .all(&*self.db)
            .await
            .map_err(classify)?;
        Ok(models.into_iter().map(Jackpot::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        jackpots::Entity::find()
            .count(&*self.db)
            .await
            .map_err(classify)
    }

    async fn insert(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
        let now = Utc::now();
        let model = jackpots::ActiveModel {
            id: Set(jackpot.id.clone()),
            name: Set(jackpot.name.clone()),
            amount_cents: Set(jackpot.amount_cents),
            max_amount_cents: Set(jackpot.max_amount_cents),
            active: Set(jackpot.active),
            contributions: Set(jackpot.contributions),
            allowed_levels: Set(jackpot.allowed_levels.clone()),
            casino_id: Set(jackpot.casino_id.clone()),
            machine_id: Set(jackpot.machine_id.clone()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(classify)?;
        Ok(model.into())
    }

    async fn save(&self, jackpot: &Jackpot) -> Result<Jackpot, StoreError> {
        let now = Utc::now();
        let changes = jackpots::ActiveModel {
            name: Set(jackpot.name.clone()),
            amount_cents: Set(jackpot.amount_cents),
            max_amount_cents: Set(jackpot.max_amount_cents),
            active: Set(jackpot.active),
            contributions: Set(jackpot.contributions),
            allowed_levels: Set(jackpot.allowed_levels.clone()),
            casino_id: Set(jackpot.casino_id.clone()),
            machine_id: Set(jackpot.machine_id.clone()),
            version: Set(jackpot.version + 1),
            updated_at: Set(now),
            ..Default::default()
        };

        // UPDATE ... WHERE id = ? AND version = ?
        let result = jackpots::Entity::update_many()
            .set(changes)
            .filter(jackpots::Column::Id.eq(jackpot.id.as_str()))
            .filter(jackpots::Column::Version.eq(jackpot.version))
            .exec(&*self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            // 区分记录不存在与版本冲突
            return match self.get(&jackpot.id).await? {
                Some(_) => Err(StoreError::VersionMismatch(jackpot.id.clone())),
                None => Err(StoreError::NotFound(jackpot.id.clone())),
            };
        }

        let mut saved = jackpot.clone();
        saved.version += 1;
        saved.updated_at = now;
        Ok(saved)
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::engine::Jackpot;

/// 奖池实体
/// - amount_cents / max_amount_cents: 金额统一用美分
/// - allowed_levels: 允许参与的玩家等级 (int[])
/// - version: 乐观锁版本号
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "jackpots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub amount_cents: i64,
    pub max_amount_cents: i64,
    pub active: bool,
    pub contributions: i64,
    pub allowed_levels: Vec<i32>,
    pub casino_id: Option<String>,
    pub machine_id: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Jackpot {
    fn from(m: Model) -> Self {
        Jackpot {
            id: m.id,
            name: m.name,
            amount_cents: m.amount_cents,
            max_amount_cents: m.max_amount_cents,
            active: m.active,
            contributions: m.contributions,
            allowed_levels: m.allowed_levels,
            casino_id: m.casino_id,
            machine_id: m.machine_id,
            version: m.version,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

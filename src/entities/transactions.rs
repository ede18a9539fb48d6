use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 交易流水（只追加）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub transaction_type: String,
    pub amount_cents: i64,
    pub player_id: Option<String>,
    pub machine_id: Option<String>,
    pub jackpot_id: Option<String>,
    /// 附加信息 (jsonb)
    pub details: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

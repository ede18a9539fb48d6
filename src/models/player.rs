use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, player_entity as players};
use crate::error::{AppError, AppResult};
use crate::utils::money::{deserialize_cents, deserialize_optional_cents};
use crate::utils::{format_cents, require_non_empty};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlayerRequest {
    #[schema(example = "PL-0001")]
    pub id: String,
    #[schema(example = "lucky7")]
    pub username: String,
    #[schema(example = 1)]
    pub level: i32,
    /// 初始余额，默认 0.00
    #[serde(default, deserialize_with = "deserialize_optional_cents")]
    #[schema(value_type = Option<String>, example = "0.00")]
    pub balance: Option<i64>,
}

impl CreatePlayerRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("id", &self.id)?;
        require_non_empty("username", &self.username)?;
        if self.level < 0 {
            return Err(AppError::ValidationError(
                "level must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePlayerRequest {
    pub username: Option<String>,
    pub level: Option<i32>,
}

impl UpdatePlayerRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.is_none() && self.level.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(username) = &self.username {
            require_non_empty("username", username)?;
        }
        if self.level.is_some_and(|l| l < 0) {
            return Err(AppError::ValidationError(
                "level must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetBalanceRequest {
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "250.00")]
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub id: String,
    pub username: String,
    pub level: i32,
    #[schema(example = "250.00")]
    pub balance: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<players::Model> for PlayerResponse {
    fn from(m: players::Model) -> Self {
        Self {
            balance: format_cents(m.balance_cents),
            id: m.id,
            username: m.username,
            level: m.level,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub player_id: String,
    #[schema(example = "250.00")]
    pub balance: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, casino_group_entity as casino_groups};
use crate::error::AppResult;
use crate::utils::{require_non_empty, require_non_empty_list};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCasinoGroupRequest {
    #[schema(example = "GRP-NORTE")]
    pub id: String,
    #[schema(example = json!(["CAS-001", "CAS-002"]))]
    pub casino_ids: Vec<String>,
}

impl CreateCasinoGroupRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("id", &self.id)?;
        require_non_empty_list("casino_ids", &self.casino_ids)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCasinoGroupRequest {
    pub casino_ids: Vec<String>,
}

impl UpdateCasinoGroupRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty_list("casino_ids", &self.casino_ids)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CasinoGroupResponse {
    pub id: String,
    pub casino_ids: Vec<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<casino_groups::Model> for CasinoGroupResponse {
    fn from(m: casino_groups::Model) -> Self {
        Self {
            id: m.id,
            casino_ids: m.casino_ids,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

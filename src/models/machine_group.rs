use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, machine_group_entity as machine_groups};
use crate::error::AppResult;
use crate::utils::{require_non_empty, require_non_empty_list};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMachineGroupRequest {
    #[schema(example = "SALA-VIP")]
    pub id: String,
    #[schema(example = json!(["GM-1001", "GM-1002"]))]
    pub machine_ids: Vec<String>,
}

impl CreateMachineGroupRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("id", &self.id)?;
        require_non_empty_list("machine_ids", &self.machine_ids)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMachineGroupRequest {
    pub machine_ids: Vec<String>,
}

impl UpdateMachineGroupRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty_list("machine_ids", &self.machine_ids)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MachineGroupResponse {
    pub id: String,
    pub machine_ids: Vec<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<machine_groups::Model> for MachineGroupResponse {
    fn from(m: machine_groups::Model) -> Self {
        Self {
            id: m.id,
            machine_ids: m.machine_ids,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::utils::{require_non_empty, require_non_empty_list};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// 与访问令牌 sub 一致
    #[schema(example = "uid-8f2c")]
    pub id: String,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "admin")]
    pub role: String,
    #[schema(example = json!(["jackpots", "casinos"]))]
    pub permissions: Vec<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        require_non_empty("role", &self.role)?;
        require_non_empty_list("permissions", &self.permissions)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_none() && self.role.is_none() && self.permissions.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(role) = &self.role {
            require_non_empty("role", role)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            permissions: m.permissions,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

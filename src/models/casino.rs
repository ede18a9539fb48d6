use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, casino_entity as casinos};
use crate::error::{AppError, AppResult};
use crate::utils::require_non_empty;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCasinoRequest {
    /// 赌场编码
    #[schema(example = "CAS-001")]
    pub id: String,
    #[schema(example = "Av. Corrientes 1234")]
    pub location: String,
    #[schema(example = "Argentina")]
    pub country: String,
    #[schema(example = "Buenos Aires")]
    pub city: String,
}

impl CreateCasinoRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("id", &self.id)?;
        require_non_empty("location", &self.location)?;
        require_non_empty("country", &self.country)?;
        require_non_empty("city", &self.city)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCasinoRequest {
    pub location: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl UpdateCasinoRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.location.is_none() && self.country.is_none() && self.city.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        for (field, value) in [
            ("location", &self.location),
            ("country", &self.country),
            ("city", &self.city),
        ] {
            if let Some(v) = value {
                require_non_empty(field, v)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CasinoResponse {
    pub id: String,
    pub location: String,
    pub country: String,
    pub city: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<casinos::Model> for CasinoResponse {
    fn from(m: casinos::Model) -> Self {
        Self {
            id: m.id,
            location: m.location,
            country: m.country,
            city: m.city,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

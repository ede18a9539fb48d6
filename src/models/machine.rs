use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{EntityStatus, machine_entity as machines};
use crate::error::{AppError, AppResult};
use crate::utils::{parse_date, require_non_empty};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMachineRequest {
    #[schema(example = "GM-1001")]
    pub id: String,
    #[schema(example = "A-17")]
    pub friendly_id: String,
    pub casino_id: String,
    pub area_id: String,
    /// 安装日期 YYYY-MM-DD
    #[schema(example = "2024-09-01")]
    pub install_date: String,
    pub manufacturer_id: String,
    #[schema(example = "0.01")]
    pub base_accounting: String,
    pub serial_number: String,
}

impl CreateMachineRequest {
    /// 校验并返回解析后的安装日期
    pub fn validate(&self) -> AppResult<NaiveDate> {
        require_non_empty("id", &self.id)?;
        require_non_empty("friendly_id", &self.friendly_id)?;
        require_non_empty("casino_id", &self.casino_id)?;
        require_non_empty("area_id", &self.area_id)?;
        require_non_empty("manufacturer_id", &self.manufacturer_id)?;
        require_non_empty("base_accounting", &self.base_accounting)?;
        require_non_empty("serial_number", &self.serial_number)?;
        parse_date("install_date", &self.install_date)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMachineRequest {
    pub friendly_id: Option<String>,
    pub casino_id: Option<String>,
    pub area_id: Option<String>,
    #[schema(example = "2024-09-01")]
    pub install_date: Option<String>,
    pub manufacturer_id: Option<String>,
    pub base_accounting: Option<String>,
    pub serial_number: Option<String>,
}

impl UpdateMachineRequest {
    pub fn validate(&self) -> AppResult<Option<NaiveDate>> {
        let fields = [
            ("friendly_id", &self.friendly_id),
            ("casino_id", &self.casino_id),
            ("area_id", &self.area_id),
            ("manufacturer_id", &self.manufacturer_id),
            ("base_accounting", &self.base_accounting),
            ("serial_number", &self.serial_number),
        ];
        if fields.iter().all(|(_, v)| v.is_none()) && self.install_date.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        for (field, value) in fields {
            if let Some(v) = value {
                require_non_empty(field, v)?;
            }
        }
        self.install_date
            .as_deref()
            .map(|d| parse_date("install_date", d))
            .transpose()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MachineResponse {
    pub id: String,
    pub friendly_id: String,
    pub casino_id: String,
    pub area_id: String,
    pub install_date: NaiveDate,
    pub manufacturer_id: String,
    pub base_accounting: String,
    pub serial_number: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<machines::Model> for MachineResponse {
    fn from(m: machines::Model) -> Self {
        Self {
            id: m.id,
            friendly_id: m.friendly_id,
            casino_id: m.casino_id,
            area_id: m.area_id,
            install_date: m.install_date,
            manufacturer_id: m.manufacturer_id,
            base_accounting: m.base_accounting,
            serial_number: m.serial_number,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

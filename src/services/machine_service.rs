use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::casino_service::status_for;
use crate::database::DbPool;
use crate::entities::{EntityStatus, machine_entity as machines};
use crate::error::{AppError, AppResult};
use crate::models::*;

pub struct MachineService {
    pool: DbPool,
}

impl MachineService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<machines::Model> {
        machines::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Machine {id} not found")))
    }

    /// 登记机台
    pub async fn create(&self, request: CreateMachineRequest) -> AppResult<MachineResponse> {
        let install_date = request.validate()?;

        let id = request.id.trim().to_string();
        if machines::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Machine {id} already exists")));
        }

        let now = Utc::now();
        let machine = machines::ActiveModel {
            id: Set(id),
            friendly_id: Set(request.friendly_id),
            casino_id: Set(request.casino_id),
            area_id: Set(request.area_id),
            install_date: Set(install_date),
            manufacturer_id: Set(request.manufacturer_id),
            base_accounting: Set(request.base_accounting),
            serial_number: Set(request.serial_number),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("Machine {} registered in casino {}", machine.id, machine.casino_id);
        Ok(machine.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<MachineResponse>> {
        let mut query = machines::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(machines::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(machines::Column::CasinoId)
            .order_by_asc(machines::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(MachineResponse::from).collect())
    }

    pub async fn update(&self, id: &str, request: UpdateMachineRequest) -> AppResult<MachineResponse> {
        let install_date = request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        if let Some(v) = request.friendly_id {
            model.friendly_id = Set(v);
        }
        if let Some(v) = request.casino_id {
            model.casino_id = Set(v);
        }
        if let Some(v) = request.area_id {
            model.area_id = Set(v);
        }
        if let Some(v) = install_date {
            model.install_date = Set(v);
        }
        if let Some(v) = request.manufacturer_id {
            model.manufacturer_id = Set(v);
        }
        if let Some(v) = request.base_accounting {
            model.base_accounting = Set(v);
        }
        if let Some(v) = request.serial_number {
            model.serial_number = Set(v);
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(&self, id: &str, status: EntityStatus) -> AppResult<MachineResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let machine = model.update(&*self.pool).await?;
        info!("Machine {id} is now {status}");
        Ok(machine.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn machine() -> machines::Model {
        let now = Utc::now();
        machines::Model {
            id: "GM-1".into(),
            friendly_id: "A-1".into(),
            casino_id: "CAS-1".into(),
            area_id: "AREA-1".into(),
            install_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            manufacturer_id: "IGT".into(),
            base_accounting: "0.01".into(),
            serial_number: "SN-1".into(),
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(install_date: &str) -> CreateMachineRequest {
        CreateMachineRequest {
            id: "GM-1".into(),
            friendly_id: "A-1".into(),
            casino_id: "CAS-1".into(),
            area_id: "AREA-1".into(),
            install_date: install_date.into(),
            manufacturer_id: "IGT".into(),
            base_accounting: "0.01".into(),
            serial_number: "SN-1".into(),
        }
    }

    #[tokio::test]
    async fn test_register_machine() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<machines::Model>::new()])
            .append_query_results([vec![machine()]])
            .into_connection();
        let service = MachineService::new(db.into());

        let created = service.create(create_request("2024-09-01")).await.unwrap();
        assert_eq!(created.id, "GM-1");
        assert_eq!(created.install_date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = MachineService::new(db.into());

        let err = service.create(create_request("2024/09/01")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![machine()]])
            .into_connection();
        let service = MachineService::new(db.into());

        let err = service.create(create_request("2024-09-01")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}

use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::casino_service::status_for;
use crate::database::DbPool;
use crate::entities::{EntityStatus, machine_group_entity as machine_groups};
use crate::error::{AppError, AppResult};
use crate::models::*;

pub struct MachineGroupService {
    pool: DbPool,
}

impl MachineGroupService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<machine_groups::Model> {
        machine_groups::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Machine group {id} not found")))
    }

    pub async fn create(
        &self,
        request: CreateMachineGroupRequest,
    ) -> AppResult<MachineGroupResponse> {
        request.validate()?;

        let id = request.id.trim().to_string();
        if machine_groups::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Machine group {id} already exists")));
        }

        let now = Utc::now();
        let group = machine_groups::ActiveModel {
            id: Set(id),
            machine_ids: Set(request.machine_ids),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("Machine group {} created with {} machine(s)", group.id, group.machine_ids.len());
        Ok(group.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<MachineGroupResponse>> {
        let mut query = machine_groups::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(machine_groups::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(machine_groups::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(MachineGroupResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateMachineGroupRequest,
    ) -> AppResult<MachineGroupResponse> {
        request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        model.machine_ids = Set(request.machine_ids);
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: EntityStatus,
    ) -> AppResult<MachineGroupResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let group = model.update(&*self.pool).await?;
        info!("Machine group {id} is now {status}");
        Ok(group.into())
    }
}

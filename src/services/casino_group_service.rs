use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::casino_service::status_for;
use crate::database::DbPool;
use crate::entities::{EntityStatus, casino_group_entity as casino_groups};
use crate::error::{AppError, AppResult};
use crate::models::*;

pub struct CasinoGroupService {
    pool: DbPool,
}

impl CasinoGroupService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<casino_groups::Model> {
        casino_groups::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Casino group {id} not found")))
    }

    pub async fn create(&self, request: CreateCasinoGroupRequest) -> AppResult<CasinoGroupResponse> {
        request.validate()?;

        let id = request.id.trim().to_string();
        if casino_groups::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Casino group {id} already exists")));
        }

        let now = Utc::now();
        let group = casino_groups::ActiveModel {
            id: Set(id),
            casino_ids: Set(request.casino_ids),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("Casino group {} created with {} casino(s)", group.id, group.casino_ids.len());
        Ok(group.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<CasinoGroupResponse>> {
        let mut query = casino_groups::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(casino_groups::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(casino_groups::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(CasinoGroupResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateCasinoGroupRequest,
    ) -> AppResult<CasinoGroupResponse> {
        request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        model.casino_ids = Set(request.casino_ids);
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(&self, id: &str, status: EntityStatus) -> AppResult<CasinoGroupResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let group = model.update(&*self.pool).await?;
        info!("Casino group {id} is now {status}");
        Ok(group.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn group(ids: &[&str]) -> casino_groups::Model {
        let now = Utc::now();
        casino_groups::Model {
            id: "GRP-1".into(),
            casino_ids: ids.iter().map(|s| s.to_string()).collect(),
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_requires_casinos() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = CasinoGroupService::new(db.into());

        let err = service
            .create(CreateCasinoGroupRequest {
                id: "GRP-1".into(),
                casino_ids: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_casinos() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![group(&["CAS-1"])]])
            .append_query_results([vec![group(&["CAS-2", "CAS-3"])]])
            .into_connection();
        let service = CasinoGroupService::new(db.into());

        let updated = service
            .update(
                "GRP-1",
                UpdateCasinoGroupRequest {
                    casino_ids: vec!["CAS-2".into(), "CAS-3".into()],
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.casino_ids, vec!["CAS-2", "CAS-3"]);
    }

    #[tokio::test]
    async fn test_list_groups() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![group(&["CAS-1"])]])
            .into_connection();
        let service = CasinoGroupService::new(db.into());

        let groups = service
            .list(&ActiveFilter { active: Some(true) })
            .await
            .unwrap();
        assert_eq!(groups.len(), 1);
    }
}

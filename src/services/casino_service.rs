use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::database::DbPool;
use crate::entities::{EntityStatus, casino_entity as casinos};
use crate::error::{AppError, AppResult};
use crate::models::*;

pub struct CasinoService {
    pool: DbPool,
}

impl CasinoService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<casinos::Model> {
        casinos::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Casino {id} not found")))
    }

    pub async fn create(&self, request: CreateCasinoRequest) -> AppResult<CasinoResponse> {
        request.validate()?;

        let id = request.id.trim().to_string();
        if casinos::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Casino {id} already exists")));
        }

        let now = Utc::now();
        let casino = casinos::ActiveModel {
            id: Set(id),
            location: Set(request.location),
            country: Set(request.country),
            city: Set(request.city),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("Casino {} created", casino.id);
        Ok(casino.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<CasinoResponse>> {
        let mut query = casinos::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(casinos::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(casinos::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(CasinoResponse::from).collect())
    }

    pub async fn update(&self, id: &str, request: UpdateCasinoRequest) -> AppResult<CasinoResponse> {
        request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        if let Some(location) = request.location {
            model.location = Set(location);
        }
        if let Some(country) = request.country {
            model.country = Set(country);
        }
        if let Some(city) = request.city {
            model.city = Set(city);
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(&self, id: &str, status: EntityStatus) -> AppResult<CasinoResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let casino = model.update(&*self.pool).await?;
        info!("Casino {id} is now {status}");
        Ok(casino.into())
    }
}

/// `?active=` 过滤值对应的状态
pub(crate) fn status_for(active: bool) -> EntityStatus {
    if active {
        EntityStatus::Active
    } else {
        EntityStatus::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn casino(id: &str, status: EntityStatus) -> casinos::Model {
        let now = Utc::now();
        casinos::Model {
            id: id.to_string(),
            location: "Av. Siempre Viva 742".into(),
            country: "Argentina".into(),
            city: "Rosario".into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(id: &str) -> CreateCasinoRequest {
        CreateCasinoRequest {
            id: id.into(),
            location: "Av. Siempre Viva 742".into(),
            country: "Argentina".into(),
            city: "Rosario".into(),
        }
    }

    #[tokio::test]
    async fn test_create_casino() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<casinos::Model>::new()])
            .append_query_results([vec![casino("CAS-1", EntityStatus::Active)]])
            .into_connection();
        let service = CasinoService::new(db.into());

        let created = service.create(create_request("CAS-1")).await.unwrap();
        assert_eq!(created.id, "CAS-1");
        assert_eq!(created.status, EntityStatus::Active);
    }

    #[tokio::test]
    async fn test_create_duplicate_casino() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![casino("CAS-1", EntityStatus::Active)]])
            .into_connection();
        let service = CasinoService::new(db.into());

        let err = service.create(create_request("CAS-1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = CasinoService::new(db.into());

        let mut request = create_request("CAS-1");
        request.city = String::new();
        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_deactivate_casino() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![casino("CAS-1", EntityStatus::Active)]])
            .append_query_results([vec![casino("CAS-1", EntityStatus::Inactive)]])
            .into_connection();
        let service = CasinoService::new(db.into());

        let casino = service
            .set_status("CAS-1", EntityStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(casino.status, EntityStatus::Inactive);
    }

    #[tokio::test]
    async fn test_update_missing_casino() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<casinos::Model>::new()])
            .into_connection();
        let service = CasinoService::new(db.into());

        let err = service
            .update(
                "CAS-404",
                UpdateCasinoRequest {
                    city: Some("Mendoza".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

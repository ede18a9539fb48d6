use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::casino_service::status_for;
use crate::database::DbPool;
use crate::entities::{EntityStatus, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;

pub struct UserService {
    pool: DbPool,
}

impl UserService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<users::Model> {
        users::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let id = request.id.trim().to_string();
        if users::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("User {id} already exists")));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(id),
            name: Set(request.name),
            role: Set(request.role),
            permissions: Set(request.permissions),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("User {} created with role {}", user.id, user.role);
        Ok(user.into())
    }

    /// 当前登录用户（令牌 sub）
    pub async fn current(&self, subject: &str) -> AppResult<UserResponse> {
        Ok(self.find(subject).await?.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<UserResponse>> {
        let mut query = users::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(users::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(users::Column::Name)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(role) = request.role {
            model.role = Set(role);
        }
        if let Some(permissions) = request.permissions {
            model.permissions = Set(permissions);
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(&self, id: &str, status: EntityStatus) -> AppResult<UserResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let user = model.update(&*self.pool).await?;
        info!("User {id} is now {status}");
        Ok(user.into())
    }
}

use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::casino_service::status_for;
use crate::database::DbPool;
use crate::entities::{EntityStatus, player_entity as players};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::format_cents;

pub struct PlayerService {
    pool: DbPool,
}

impl PlayerService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: &str) -> AppResult<players::Model> {
        players::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {id} not found")))
    }

    pub async fn create(&self, request: CreatePlayerRequest) -> AppResult<PlayerResponse> {
        request.validate()?;

        let id = request.id.trim().to_string();
        if players::Entity::find_by_id(id.clone())
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Player {id} already exists")));
        }

        let now = Utc::now();
        let player = players::ActiveModel {
            id: Set(id),
            username: Set(request.username),
            level: Set(request.level),
            balance_cents: Set(request.balance.unwrap_or(0)),
            status: Set(EntityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.pool)
        .await?;

        info!("Player {} created at level {}", player.id, player.level);
        Ok(player.into())
    }

    pub async fn list(&self, filter: &ActiveFilter) -> AppResult<Vec<PlayerResponse>> {
        let mut query = players::Entity::find();
        if let Some(active) = filter.active {
            query = query.filter(players::Column::Status.eq(status_for(active)));
        }
        let models = query
            .order_by_asc(players::Column::Username)
            .all(&*self.pool)
            .await?;
        Ok(models.into_iter().map(PlayerResponse::from).collect())
    }

    pub async fn update(&self, id: &str, request: UpdatePlayerRequest) -> AppResult<PlayerResponse> {
        request.validate()?;

        let mut model = self.find(id).await?.into_active_model();
        if let Some(username) = request.username {
            model.username = Set(username);
        }
        if let Some(level) = request.level {
            model.level = Set(level);
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(&*self.pool).await?.into())
    }

    pub async fn set_status(&self, id: &str, status: EntityStatus) -> AppResult<PlayerResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let player = model.update(&*self.pool).await?;
        info!("Player {id} is now {status}");
        Ok(player.into())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = players::Entity::delete_by_id(id.to_string())
            .exec(&*self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Player {id} not found")));
        }
        info!("Player {id} deleted");
        Ok(())
    }

    pub async fn balance(&self, id: &str) -> AppResult<BalanceResponse> {
        let player = self.find(id).await?;
        Ok(BalanceResponse {
            player_id: player.id,
            balance: format_cents(player.balance_cents),
        })
    }

    pub async fn set_balance(&self, id: &str, request: SetBalanceRequest) -> AppResult<BalanceResponse> {
        let mut model = self.find(id).await?.into_active_model();
        model.balance_cents = Set(request.balance);
        model.updated_at = Set(Utc::now());
        let player = model.update(&*self.pool).await?;
        info!("Player {id} balance set to {}", format_cents(player.balance_cents));
        Ok(BalanceResponse {
            player_id: player.id,
            balance: format_cents(player.balance_cents),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn player(balance_cents: i64) -> players::Model {
        let now = Utc::now();
        players::Model {
            id: "PL-1".into(),
            username: "lucky7".into(),
            level: 2,
            balance_cents,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_player_defaults_balance() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<players::Model>::new()])
            .append_query_results([vec![player(0)]])
            .into_connection();
        let service = PlayerService::new(db.into());

        let created = service
            .create(CreatePlayerRequest {
                id: "PL-1".into(),
                username: "lucky7".into(),
                level: 2,
                balance: None,
            })
            .await
            .unwrap();
        assert_eq!(created.balance, "0.00");
        assert_eq!(created.status, EntityStatus::Active);
    }

    #[tokio::test]
    async fn test_balance_roundtrip() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![player(0)]])
            .append_query_results([vec![player(25050)]])
            .append_query_results([vec![player(25050)]])
            .into_connection();
        let service = PlayerService::new(db.into());

        let set = service
            .set_balance("PL-1", SetBalanceRequest { balance: 25050 })
            .await
            .unwrap();
        assert_eq!(set.balance, "250.50");

        let got = service.balance("PL-1").await.unwrap();
        assert_eq!(got.player_id, "PL-1");
        assert_eq!(got.balance, "250.50");
    }

    #[tokio::test]
    async fn test_delete_missing_player() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = PlayerService::new(db.into());

        let err = service.delete("PL-404").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_player() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = PlayerService::new(db.into());

        assert!(service.delete("PL-1").await.is_ok());
    }
}

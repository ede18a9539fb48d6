use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::database::DbPool;
use crate::entities::transaction_entity as transactions;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{Page, PageParams};

pub struct TransactionService {
    pool: DbPool,
}

impl TransactionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 记录一笔交易，id 由服务端生成
    pub async fn record(&self, request: CreateTransactionRequest) -> AppResult<TransactionResponse> {
        request.validate()?;

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            transaction_type: Set(request.transaction_type),
            amount_cents: Set(request.amount),
            player_id: Set(request.player_id),
            machine_id: Set(request.machine_id),
            jackpot_id: Set(request.jackpot_id),
            details: Set(request.details),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.pool)
        .await?;

        info!(
            "Transaction {} recorded ({})",
            transaction.id, transaction.transaction_type
        );
        Ok(transaction.into())
    }

    /// 按时间倒序分页
    pub async fn list(&self, params: &PageParams) -> AppResult<Page<TransactionResponse>> {
        let total = transactions::Entity::find().count(&*self.pool).await?;
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(params.per_page())
            .offset(params.offset())
            .all(&*self.pool)
            .await?;
        let items = models.into_iter().map(TransactionResponse::from).collect();
        Ok(Page::new(items, params, total))
    }

    pub async fn get(&self, id: &str) -> AppResult<TransactionResponse> {
        transactions::Entity::find_by_id(id.to_string())
            .one(&*self.pool)
            .await?
            .map(TransactionResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn transaction(id: &str) -> transactions::Model {
        transactions::Model {
            id: id.into(),
            transaction_type: "jackpot_payout".into(),
            amount_cents: 10000,
            player_id: Some("PL-1".into()),
            machine_id: None,
            jackpot_id: Some("jp-1".into()),
            details: Some(json!({"note": "manual"})),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![transaction("tx-1")]])
            .into_connection();
        let service = TransactionService::new(db.into());

        let recorded = service
            .record(CreateTransactionRequest {
                transaction_type: "jackpot_payout".into(),
                amount: 10000,
                player_id: Some("PL-1".into()),
                machine_id: None,
                jackpot_id: Some("jp-1".into()),
                details: Some(json!({"note": "manual"})),
            })
            .await
            .unwrap();
        assert_eq!(recorded.amount, "100.00");
        assert_eq!(recorded.details, Some(json!({"note": "manual"})));
    }

    #[tokio::test]
    async fn test_get_missing_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();
        let service = TransactionService::new(db.into());

        let err = service.get("tx-404").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

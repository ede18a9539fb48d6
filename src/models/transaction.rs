use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::transaction_entity as transactions;
use crate::error::{AppError, AppResult};
use crate::utils::money::deserialize_cents;
use crate::utils::{format_cents, require_non_empty};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[schema(example = "jackpot_payout")]
    pub transaction_type: String,
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "100.00")]
    pub amount: i64,
    pub player_id: Option<String>,
    pub machine_id: Option<String>,
    pub jackpot_id: Option<String>,
    /// 任意附加信息，必须是 JSON 对象
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl CreateTransactionRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("transaction_type", &self.transaction_type)?;
        if let Some(details) = &self.details
            && !details.is_object()
        {
            return Err(AppError::ValidationError(
                "details must be a JSON object".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: String,
    pub transaction_type: String,
    #[schema(example = "100.00")]
    pub amount: String,
    pub player_id: Option<String>,
    pub machine_id: Option<String>,
    pub jackpot_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(m: transactions::Model) -> Self {
        Self {
            amount: format_cents(m.amount_cents),
            id: m.id,
            transaction_type: m.transaction_type,
            player_id: m.player_id,
            machine_id: m.machine_id,
            jackpot_id: m.jackpot_id,
            details: m.details,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_must_be_object() {
        let req: CreateTransactionRequest = serde_json::from_str(
            r#"{"transaction_type":"jackpot_payout","amount":"100","details":[1,2]}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateTransactionRequest = serde_json::from_str(
            r#"{"transaction_type":"jackpot_payout","amount":100,"details":{"spin":"abc"}}"#,
        )
        .unwrap();
        assert_eq!(req.amount, 10000);
        assert!(req.validate().is_ok());
    }
}

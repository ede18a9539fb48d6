use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::{Jackpot, SpinDecision, SpinOutcome};
use crate::error::{AppError, AppResult};
use crate::utils::money::{deserialize_cents, deserialize_optional_cents};
use crate::utils::{format_cents, require_non_empty};

fn check_trigger(max_amount_cents: i64) -> AppResult<()> {
    if max_amount_cents <= 0 {
        return Err(AppError::ValidationError(
            "max_amount must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateJackpotRequest {
    /// 不传时生成 UUID
    #[schema(example = "mega-001")]
    pub id: Option<String>,
    #[schema(example = "Mega")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "0.00")]
    pub amount: i64,
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "1000.00")]
    pub max_amount: i64,
    #[serde(default)]
    #[schema(example = json!([1, 2, 3]))]
    pub allowed_levels: Vec<i32>,
    pub casino_id: Option<String>,
    pub machine_id: Option<String>,
}

impl CreateJackpotRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("name", &self.name)?;
        if let Some(id) = &self.id {
            require_non_empty("id", id)?;
        }
        check_trigger(self.max_amount)
    }
}

/// 部分更新，未提供的字段保持不变
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateJackpotRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_cents")]
    #[schema(value_type = Option<String>, example = "250.00")]
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_cents")]
    #[schema(value_type = Option<String>, example = "1000.00")]
    pub max_amount: Option<i64>,
    pub active: Option<bool>,
    pub allowed_levels: Option<Vec<i32>>,
    pub casino_id: Option<String>,
    pub machine_id: Option<String>,
}

impl UpdateJackpotRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_none()
            && self.amount.is_none()
            && self.max_amount.is_none()
            && self.active.is_none()
            && self.allowed_levels.is_none()
            && self.casino_id.is_none()
            && self.machine_id.is_none()
        {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(max) = self.max_amount {
            check_trigger(max)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAmountRequest {
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "500.00")]
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetTriggerRequest {
    #[serde(alias = "trigger_amount", deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "1000.00")]
    pub max_amount: i64,
}

impl SetTriggerRequest {
    pub fn validate(&self) -> AppResult<()> {
        check_trigger(self.max_amount)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLevelsRequest {
    #[schema(example = json!([1, 2]))]
    pub allowed_levels: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JackpotResponse {
    pub id: String,
    pub name: String,
    #[schema(example = "95.00")]
    pub amount: String,
    #[schema(example = "100.00")]
    pub max_amount: String,
    pub active: bool,
    pub contributions: i64,
    pub allowed_levels: Vec<i32>,
    pub casino_id: Option<String>,
    pub machine_id: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Jackpot> for JackpotResponse {
    fn from(jp: Jackpot) -> Self {
        Self {
            amount: format_cents(jp.amount_cents),
            max_amount: format_cents(jp.max_amount_cents),
            id: jp.id,
            name: jp.name,
            active: jp.active,
            contributions: jp.contributions,
            allowed_levels: jp.allowed_levels,
            casino_id: jp.casino_id,
            machine_id: jp.machine_id,
            version: jp.version,
            created_at: jp.created_at,
            updated_at: jp.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpinRequest {
    /// 下注金额
    #[serde(deserialize_with = "deserialize_cents")]
    #[schema(value_type = String, example = "15.00")]
    pub amount: i64,
    #[schema(example = 1)]
    pub player_level: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SpinResponse {
    pub outcome: SpinOutcome,
    /// 派奖分支为派奖金额，贡献分支为贡献额，重新激活为 0.00
    #[schema(example = "12.30")]
    pub amount_won: String,
    /// 玩家实际获得的金额
    #[schema(example = "0.00")]
    pub payout: String,
    /// 本次累加进奖池的金额
    #[schema(example = "12.30")]
    pub contribution: String,
    /// spin 之后的奖池金额
    #[schema(example = "107.30")]
    pub jackpot_amount: String,
    pub in_jackpot: bool,
    pub won_jackpot: bool,
}

impl From<&SpinDecision> for SpinResponse {
    fn from(d: &SpinDecision) -> Self {
        Self {
            outcome: d.outcome,
            amount_won: format_cents(d.amount_won_cents()),
            payout: format_cents(d.payout_cents),
            contribution: format_cents(d.contribution_cents),
            jackpot_amount: format_cents(d.jackpot.amount_cents),
            in_jackpot: d.in_jackpot(),
            won_jackpot: d.won_jackpot,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JackpotAmountResponse {
    #[schema(example = "95.00")]
    pub jackpot_amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_numbers_and_strings() {
        let req: CreateJackpotRequest = serde_json::from_str(
            r#"{"name":"Mega","amount":12.5,"max_amount":"1000","allowed_levels":[1]}"#,
        )
        .unwrap();
        assert_eq!(req.amount, 1250);
        assert_eq!(req.max_amount, 100000);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let res = serde_json::from_str::<CreateJackpotRequest>(
            r#"{"name":"Mega","amount":"-1","max_amount":"10"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_create_requires_name_and_trigger() {
        let req: CreateJackpotRequest =
            serde_json::from_str(r#"{"name":"  ","amount":0,"max_amount":10}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateJackpotRequest =
            serde_json::from_str(r#"{"name":"Mega","amount":0,"max_amount":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_requires_some_field() {
        let empty: UpdateJackpotRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_err());

        let partial: UpdateJackpotRequest =
            serde_json::from_str(r#"{"amount":"7.25"}"#).unwrap();
        assert_eq!(partial.amount, Some(725));
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn test_trigger_alias() {
        let req: SetTriggerRequest = serde_json::from_str(r#"{"trigger_amount":"99.99"}"#).unwrap();
        assert_eq!(req.max_amount, 9999);
    }

    #[test]
    fn test_spin_request() {
        let req: SpinRequest =
            serde_json::from_str(r#"{"amount":"15.00","player_level":2}"#).unwrap();
        assert_eq!(req.amount, 1500);
        assert_eq!(req.player_level, 2);
    }
}

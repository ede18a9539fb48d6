//! 奖池引擎：单次下注 (spin) 对奖池状态的更新规则。
//!
//! 引擎是纯逻辑，不做任何 I/O：调用方负责读取最新状态、持久化返回的新状态，
//! 以及在派奖时广播 `jackpot-won` 事件。
//!
//! 判定顺序固定:
//! 1. 玩家等级不在 `allowed_levels` 中 -> `LevelNotAllowed`，状态不变
//! 2. 未激活且 `amount + wager >= max_amount` -> 重新激活，本次不派奖
//! 3. 已激活且 `amount >= max_amount` -> 派发全部奖池，清零并置为未激活
//! 4. 其它情况 -> 随机抽取 [10.0, 15.5) 的贡献额累加进奖池

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// 单次贡献下限（单位：角，即 10.0）
pub const CONTRIBUTION_MIN_TENTHS: i64 = 100;
/// 单次贡献上限（不含，单位：角，即 15.5）
pub const CONTRIBUTION_MAX_TENTHS: i64 = 155;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("player level {0} is not allowed")]
    LevelNotAllowed(i32),
}

/// 奖池状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jackpot {
    pub id: String,
    /// 展示名称（唯一，spin 按名称查找）
    pub name: String,
    /// 当前奖池金额（美分，>= 0）
    pub amount_cents: i64,
    /// 触发派奖的阈值（美分）
    pub max_amount_cents: i64,
    pub active: bool,
    /// 自上次重置以来的贡献次数
    pub contributions: i64,
    pub allowed_levels: Vec<i32>,
    pub casino_id: Option<String>,
    pub machine_id: Option<String>,
    /// 乐观锁版本号，每次写入 +1
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Jackpot {
    /// 新建奖池：默认激活，贡献次数为 0
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount_cents: i64,
        max_amount_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            amount_cents,
            max_amount_cents,
            active: true,
            contributions: 0,
            allowed_levels: Vec::new(),
            casino_id: None,
            machine_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn allows_level(&self, level: i32) -> bool {
        self.allowed_levels.contains(&level)
    }

    /// 金额已达阈值（可派奖或待重新激活）
    pub fn at_threshold(&self) -> bool {
        self.amount_cents >= self.max_amount_cents
    }

    pub fn reset(&mut self) {
        self.amount_cents = 0;
        self.active = false;
        self.contributions = 0;
    }
}

/// spin 结果分支
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpinOutcome {
    /// 未激活的奖池在本次下注后达到阈值，重新激活，不派奖
    Reactivated,
    /// 奖池派奖，金额清零
    JackpotPaid,
    /// 随机贡献额累加进奖池
    Contributed,
}

/// 派奖事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackpotWon {
    pub jackpot_id: String,
    pub name: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone)]
pub struct SpinDecision {
    pub outcome: SpinOutcome,
    /// 玩家实际获得的金额（仅派奖分支非零）
    pub payout_cents: i64,
    /// 本次累加进奖池的金额（仅贡献分支非零）
    pub contribution_cents: i64,
    /// 本次是否中奖池: payout == 派奖前金额 且 派奖前金额 >= 阈值
    pub won_jackpot: bool,
    /// 更新后的奖池，由调用方持久化
    pub jackpot: Jackpot,
    pub won: Option<JackpotWon>,
}

impl SpinDecision {
    /// 兼容旧接口的 amountWon：派奖分支为派奖金额，贡献分支为贡献额，重新激活为 0
    pub fn amount_won_cents(&self) -> i64 {
        match self.outcome {
            SpinOutcome::Reactivated => 0,
            SpinOutcome::JackpotPaid => self.payout_cents,
            SpinOutcome::Contributed => self.contribution_cents,
        }
    }

    pub fn in_jackpot(&self) -> bool {
        self.jackpot.active
    }
}

/// 随机贡献额：[10.0, 15.5) 内按 0.1 粒度均匀抽取，返回美分
pub fn draw_contribution<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(CONTRIBUTION_MIN_TENTHS..CONTRIBUTION_MAX_TENTHS) * 10
}

/// 计算一次 spin 的结果，不修改入参
pub fn evaluate_spin<R: Rng + ?Sized>(
    jackpot: &Jackpot,
    wager_cents: i64,
    player_level: i32,
    rng: &mut R,
) -> Result<SpinDecision, EngineError> {
    if !jackpot.allows_level(player_level) {
        return Err(EngineError::LevelNotAllowed(player_level));
    }

    let mut next = jackpot.clone();

    if !jackpot.active && jackpot.amount_cents.saturating_add(wager_cents) >= jackpot.max_amount_cents
    {
        next.active = true;
        return Ok(SpinDecision {
            outcome: SpinOutcome::Reactivated,
            payout_cents: 0,
            contribution_cents: 0,
            won_jackpot: false,
            jackpot: next,
            won: None,
        });
    }

    if jackpot.active && jackpot.at_threshold() {
        let payout = jackpot.amount_cents;
        next.amount_cents = 0;
        next.active = false;
        let won_jackpot = payout == jackpot.amount_cents && jackpot.at_threshold();
        return Ok(SpinDecision {
            outcome: SpinOutcome::JackpotPaid,
            payout_cents: payout,
            contribution_cents: 0,
            won_jackpot,
            won: Some(JackpotWon {
                jackpot_id: jackpot.id.clone(),
                name: jackpot.name.clone(),
                amount_cents: payout,
            }),
            jackpot: next,
        });
    }

    // 激活但未达阈值 / 未激活且本次下注后仍未达阈值
    let contribution = draw_contribution(rng);
    next.amount_cents = jackpot.amount_cents.saturating_add(contribution);
    // 只有激活中的奖池计入贡献次数
    if jackpot.active {
        next.contributions = jackpot.contributions + 1;
    }

    Ok(SpinDecision {
        outcome: SpinOutcome::Contributed,
        payout_cents: 0,
        contribution_cents: contribution,
        won_jackpot: false,
        jackpot: next,
        won: None,
    })
}

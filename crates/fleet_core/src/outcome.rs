//! Victory / defeat evaluation.
//!
//! Reads accumulated state only. Game over is data, not an error.

use serde::{Deserialize, Serialize};

use crate::metrics::{completion_rate, survival_rate};
use crate::GameState;

const BUDGET_TARGET: i64 = 15_000;
const SURVIVAL_TARGET: f32 = 0.5;
const COMPLETION_TARGET: f32 = 0.35;

const EXCELLENT_BUDGET: i64 = 35_000;
const EXCELLENT_SURVIVAL: f32 = 0.75;
const EXCELLENT_PROFIT: i64 = 20_000;
const GOOD_BUDGET: i64 = 25_000;
const GOOD_PROFIT: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Excellent,
    Good,
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    Bankruptcy,
    FleetLost,
    InefficientManagement,
}

impl std::fmt::Display for DefeatReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DefeatReason::Bankruptcy => "Bankruptcy: the operating budget ran out",
            DefeatReason::FleetLost => "Total fleet loss: no satellites remain operational",
            DefeatReason::InefficientManagement => {
                "Inefficient management: the mission objectives were not met"
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStats {
    pub final_budget: i64,
    pub profit: i64,
    pub survival_rate_pct: u32,
    pub completion_rate_pct: u32,
    pub collisions: u64,
    pub tasks_completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Victory {
        rank: Rank,
        stats: OutcomeStats,
    },
    Defeat {
        reason: DefeatReason,
        message: String,
        stats: OutcomeStats,
    },
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// The four end-of-game criteria, kept separate so callers can show which
/// ones were met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criteria {
    pub budget: bool,
    pub survival: bool,
    pub completion: bool,
    pub profit: bool,
}

impl Criteria {
    pub fn evaluate(state: &GameState) -> Self {
        Criteria {
            budget: state.budget > BUDGET_TARGET,
            survival: survival_rate(state) >= SURVIVAL_TARGET,
            completion: completion_rate(state) >= COMPLETION_TARGET,
            profit: profit(state) > 0,
        }
    }

    pub fn met(self) -> usize {
        [self.budget, self.survival, self.completion, self.profit]
            .into_iter()
            .filter(|&met| met)
            .count()
    }
}

fn profit(state: &GameState) -> i64 {
    state.stats.total_earned - state.stats.total_spent
}

/// Over once the turn limit passes, the budget is exhausted, or no satellite
/// is still active.
pub fn is_game_over(state: &GameState) -> bool {
    state.meta.turn > state.meta.max_turns || state.budget <= 0 || state.active_count() == 0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(rate: f32) -> u32 {
    (rate * 100.0).round().max(0.0) as u32
}

fn outcome_stats(state: &GameState) -> OutcomeStats {
    OutcomeStats {
        final_budget: state.budget,
        profit: profit(state),
        survival_rate_pct: percent(survival_rate(state)),
        completion_rate_pct: percent(completion_rate(state)),
        collisions: state.stats.collisions,
        tasks_completed: state.stats.tasks_completed,
    }
}

fn rank(state: &GameState, criteria_met: usize) -> Rank {
    let budget = state.budget;
    let profit = profit(state);
    if criteria_met >= 3
        && budget > EXCELLENT_BUDGET
        && survival_rate(state) > EXCELLENT_SURVIVAL
        && profit > EXCELLENT_PROFIT
    {
        Rank::Excellent
    } else if criteria_met >= 3 && (budget > GOOD_BUDGET || profit > GOOD_PROFIT) {
        Rank::Good
    } else {
        Rank::Basic
    }
}

fn defeat_reason(state: &GameState) -> DefeatReason {
    if state.budget <= 0 {
        DefeatReason::Bankruptcy
    } else if state.active_count() == 0 {
        DefeatReason::FleetLost
    } else {
        DefeatReason::InefficientManagement
    }
}

pub fn evaluate_game_status(state: &GameState) -> Outcome {
    if !is_game_over(state) {
        return Outcome::Ongoing;
    }
    let criteria_met = Criteria::evaluate(state).met();
    let stats = outcome_stats(state);
    if criteria_met >= 2 && state.budget > 0 {
        Outcome::Victory {
            rank: rank(state, criteria_met),
            stats,
        }
    } else {
        let reason = defeat_reason(state);
        Outcome::Defeat {
            reason,
            message: reason.to_string(),
            stats,
        }
    }
}

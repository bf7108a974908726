//! Strategic tips derived from a single game snapshot.

use fleet_core::{compute_metrics, GameState, MetricsSnapshot, TaskPriority};
use serde::Serialize;

const BUDGET_LOW: i64 = 20_000;
const BUDGET_CRITICAL: i64 = 10_000;
const HIGH_RISK: f32 = 0.3;
const LOW_EFFICIENCY: f32 = 0.7;
const LOW_COMPLETION: f32 = 0.35;
const COMPLETION_GRACE_TURNS: u64 = 3;
const UPSIDE_BUDGET: i64 = 40_000;
const UPSIDE_EFFICIENCY: f32 = 0.85;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub id: &'static str,
    pub message: String,
}

type CheckFn = fn(&MetricsSnapshot, &GameState) -> bool;

struct TipRule {
    id: &'static str,
    check: CheckFn,
    message: fn(&MetricsSnapshot) -> String,
}

/// Evaluated top to bottom; output keeps this order.
const RULES: &[TipRule] = &[
    TipRule {
        id: "BUDGET_CRITICAL",
        check: |m, _| m.budget < BUDGET_CRITICAL,
        message: |_| {
            "Budget critical: stop discretionary spending and complete paying tasks now".to_string()
        },
    },
    TipRule {
        id: "BUDGET_LOW",
        check: |m, _| (BUDGET_CRITICAL..BUDGET_LOW).contains(&m.budget),
        message: |_| "Budget running low: favour paying tasks over upkeep".to_string(),
    },
    TipRule {
        id: "HIGH_RISK",
        check: |m, _| m.fleet_active > 0 && m.mean_risk > HIGH_RISK,
        message: |_| {
            "Fleet collision risk is high: schedule collision avoidance maneuvers (CAM)".to_string()
        },
    },
    TipRule {
        id: "LOW_EFFICIENCY",
        check: |m, _| m.fleet_active > 0 && m.mean_efficiency < LOW_EFFICIENCY,
        message: |_| "Fleet efficiency is low: maintenance restores payout rates".to_string(),
    },
    TipRule {
        id: "CRITICAL_TASKS",
        check: |m, _| m.critical_tasks > 0,
        message: |m| {
            format!(
                "{} critical task(s) pending: they pay the most and expire fastest",
                m.critical_tasks
            )
        },
    },
    TipRule {
        id: "LOW_COMPLETION",
        check: |m, _| m.turn > COMPLETION_GRACE_TURNS && m.completion_rate < LOW_COMPLETION,
        message: |_| {
            "Task completion rate is low: assign satellites before deadlines pass".to_string()
        },
    },
    TipRule {
        id: "LOW_FUEL",
        check: |m, _| m.low_fuel_count > 0,
        message: |m| {
            format!(
                "{} satellite(s) below 20% fuel: refuel before taking on tasks",
                m.low_fuel_count
            )
        },
    },
    TipRule {
        id: "IMAGING_UPSIDE",
        check: |m, _| {
            m.fleet_active > 0 && m.budget > UPSIDE_BUDGET && m.mean_efficiency > UPSIDE_EFFICIENCY
        },
        message: |_| "Healthy budget and an efficient fleet: imaging passes pay well".to_string(),
    },
    TipRule {
        id: "MAINTENANCE_UPSIDE",
        check: |m, state| m.profit > 0 && !has_high_value_tasks(state),
        message: |_| {
            "Running a profit with no high-value tasks pending: invest in maintenance".to_string()
        },
    },
];

fn has_high_value_tasks(state: &GameState) -> bool {
    state
        .tasks
        .iter()
        .any(|task| task.reward > 0 && task.priority >= TaskPriority::High)
}

/// Every tip that applies to `state`, with its stable id.
pub fn strategic_tips(state: &GameState) -> Vec<Tip> {
    let metrics = compute_metrics(state);
    RULES
        .iter()
        .filter(|rule| (rule.check)(&metrics, state))
        .map(|rule| Tip {
            id: rule.id,
            message: (rule.message)(&metrics),
        })
        .collect()
}

pub fn get_strategic_tips(state: &GameState) -> Vec<String> {
    strategic_tips(state)
        .into_iter()
        .map(|tip| tip.message)
        .collect()
}

//! Snapshot metrics computed from `GameState`.
//!
//! `compute_metrics(&GameState) -> MetricsSnapshot` samples the fleet for
//! status lines, the outcome evaluator, the advisor, and per-run CSV output.
//! No state mutation, no IO beyond the explicit CSV writers.

use serde::Serialize;

use crate::{GameState, TaskPriority};

/// Current schema version. Bump when fields are added/removed/reordered.
const METRICS_VERSION: u32 = 1;

/// Fuel percentage under which a satellite counts as low on fuel.
pub const LOW_FUEL_THRESHOLD: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub turn: u64,
    pub metrics_version: u32,

    // Economy
    pub budget: i64,
    pub total_earned: i64,
    pub total_spent: i64,
    pub profit: i64,

    // Fleet
    pub fleet_total: u32,
    pub fleet_active: u32,
    pub survival_rate: f32,
    pub mean_risk: f32,
    pub mean_efficiency: f32,
    pub low_fuel_count: u32,

    // Contracts
    pub pending_tasks: u32,
    pub critical_tasks: u32,
    pub tasks_completed: u64,
    pub completion_rate: f32,

    // Hazards
    pub collisions: u64,
    pub emergencies: u64,
}

fn mean_over_active(state: &GameState, field: fn(&crate::Satellite) -> f32) -> f32 {
    let (sum, count) = state
        .active_satellites()
        .fold((0.0_f32, 0_u32), |(sum, count), sat| (sum + field(sat), count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Mean collision risk over active satellites; 0 with none active.
pub fn mean_active_risk(state: &GameState) -> f32 {
    mean_over_active(state, |sat| sat.collision_risk)
}

/// Mean efficiency over active satellites; 0 with none active.
pub fn mean_active_efficiency(state: &GameState) -> f32 {
    mean_over_active(state, |sat| sat.efficiency)
}

/// Active over total satellites; 0 for an empty fleet.
pub fn survival_rate(state: &GameState) -> f32 {
    if state.satellites.is_empty() {
        0.0
    } else {
        state.active_count() as f32 / state.satellites.len() as f32
    }
}

/// Completed tasks per elapsed turn, `tasks_completed / max(1, turn - 1)`.
pub fn completion_rate(state: &GameState) -> f32 {
    let elapsed = state.meta.turn.saturating_sub(1).max(1);
    state.stats.tasks_completed as f32 / elapsed as f32
}

pub fn low_fuel_count(state: &GameState) -> usize {
    state
        .active_satellites()
        .filter(|sat| sat.fuel < LOW_FUEL_THRESHOLD)
        .count()
}

#[allow(clippy::cast_possible_truncation)]
pub fn compute_metrics(state: &GameState) -> MetricsSnapshot {
    let critical_tasks = state
        .tasks
        .iter()
        .filter(|task| task.priority == TaskPriority::Critical)
        .count();

    MetricsSnapshot {
        turn: state.meta.turn,
        metrics_version: METRICS_VERSION,
        budget: state.budget,
        total_earned: state.stats.total_earned,
        total_spent: state.stats.total_spent,
        profit: state.stats.total_earned - state.stats.total_spent,
        fleet_total: state.satellites.len() as u32,
        fleet_active: state.active_count() as u32,
        survival_rate: survival_rate(state),
        mean_risk: mean_active_risk(state),
        mean_efficiency: mean_active_efficiency(state),
        low_fuel_count: low_fuel_count(state) as u32,
        pending_tasks: state.tasks.len() as u32,
        critical_tasks: critical_tasks as u32,
        tasks_completed: state.stats.tasks_completed,
        completion_rate: completion_rate(state),
        collisions: state.stats.collisions,
        emergencies: state.stats.emergencies,
    }
}

/// Write the CSV header row for metrics.
pub fn write_metrics_header(writer: &mut impl std::io::Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "turn,metrics_version,\
         budget,total_earned,total_spent,profit,\
         fleet_total,fleet_active,survival_rate,mean_risk,mean_efficiency,low_fuel_count,\
         pending_tasks,critical_tasks,tasks_completed,completion_rate,\
         collisions,emergencies"
    )
}

/// Append a single metrics snapshot as a CSV row.
pub fn append_metrics_row(
    writer: &mut impl std::io::Write,
    snapshot: &MetricsSnapshot,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        snapshot.turn,
        snapshot.metrics_version,
        snapshot.budget,
        snapshot.total_earned,
        snapshot.total_spent,
        snapshot.profit,
        snapshot.fleet_total,
        snapshot.fleet_active,
        snapshot.survival_rate,
        snapshot.mean_risk,
        snapshot.mean_efficiency,
        snapshot.low_fuel_count,
        snapshot.pending_tasks,
        snapshot.critical_tasks,
        snapshot.tasks_completed,
        snapshot.completion_rate,
        snapshot.collisions,
        snapshot.emergencies,
    )
}

/// Write a collection of snapshots to a CSV file.
pub fn write_metrics_csv(
    path: &std::path::Path,
    snapshots: &[MetricsSnapshot],
) -> std::io::Result<()> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_metrics_header(&mut writer)?;
    for snapshot in snapshots {
        append_metrics_row(&mut writer, snapshot)?;
    }
    std::io::Write::flush(&mut writer)
}

//! `fleet_core`: satellite fleet turn engine.
//!
//! No IO, no network. All randomness via the passed-in Rng.

mod actions;
mod catalog;
mod dice;
mod engine;
mod error;
pub mod factory;
mod hazards;
mod id;
mod ledger;
pub mod metrics;
pub mod outcome;
mod tasks;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use actions::imaging_multiplier;
pub use catalog::{standard_constants, standard_task_templates, STANDARD_CONTENT_VERSION};
pub use engine::step_turn;
pub use error::{GameError, Result};
pub use factory::{create_initial_state, new_satellite, new_task};
pub use hazards::{operational_cost, operational_discount};
pub use id::generate_uuid;
pub use metrics::{compute_metrics, write_metrics_csv, MetricsSnapshot};
pub use outcome::{evaluate_game_status, DefeatReason, Outcome, OutcomeStats, Rank};
pub use tasks::{task_payout, tasks_offered};
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, turn: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, turn, event }
}

/// Append `event` to the history, tagged with the current turn.
pub(crate) fn record(state: &mut GameState, event: Event) {
    let envelope = emit(&mut state.counters, state.meta.turn, event);
    state.history.push(envelope);
}

#[cfg(test)]
mod tests;

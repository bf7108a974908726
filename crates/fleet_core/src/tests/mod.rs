use super::*;
use crate::test_fixtures::{base_content, base_state, make_rng, ScriptedRng};

mod actions;

// --- Shared test helpers ------------------------------------------------

fn sat_id(id: &str) -> SatelliteId {
    SatelliteId(id.to_string())
}

fn task_id(id: &str) -> TaskId {
    TaskId(id.to_string())
}

fn action(satellite: &str, action: SatelliteAction) -> ActionOrder {
    ActionOrder {
        satellite_id: sat_id(satellite),
        action,
    }
}

fn assign(task: &str, satellite: &str) -> Assignment {
    Assignment {
        task_id: task_id(task),
        satellite_id: sat_id(satellite),
    }
}

fn actions_only(actions: Vec<ActionOrder>) -> TurnOrders {
    TurnOrders {
        actions,
        ..TurnOrders::default()
    }
}

fn assignments_only(assignments: Vec<Assignment>) -> TurnOrders {
    TurnOrders {
        assignments,
        ..TurnOrders::default()
    }
}

/// Reset the starting budget while keeping the ledger balanced.
fn set_budget(state: &mut GameState, budget: i64) {
    state.budget = budget;
    state.meta.initial_budget = budget;
}

fn satellite<'a>(state: &'a GameState, id: &str) -> &'a Satellite {
    state.satellite(&sat_id(id)).expect("satellite exists")
}

fn satellite_mut<'a>(state: &'a mut GameState, id: &str) -> &'a mut Satellite {
    state
        .satellites
        .iter_mut()
        .find(|sat| sat.id.0 == id)
        .expect("satellite exists")
}

fn events(state: &GameState) -> Vec<&Event> {
    state.history.iter().map(|envelope| &envelope.event).collect()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

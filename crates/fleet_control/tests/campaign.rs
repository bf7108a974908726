//! Campaign regression tests.
//!
//! These run full games with the autopilot against the shipped content files
//! and check that a managed fleet stays solvent and beats an idle one. They
//! catch balance regressions from content or rule changes.

use std::path::PathBuf;

use fleet_control::{get_strategic_tips, strategic_tips, AutopilotController, OrderSource};
use fleet_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn shipped_content() -> GameContent {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content");
    fleet_world::load_content(&dir).unwrap()
}

/// Play until the game is decided, returning the final state.
fn play(source: &mut impl OrderSource, content: &GameContent, seed: u64) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = create_initial_state(65_000, 4, content, &mut rng).unwrap();
    while !evaluate_game_status(&state).is_over() {
        let orders = source.generate_orders(&state, content);
        state = step_turn(&state, &orders, content, &mut rng);
        assert_eq!(state.budget, state.ledger_balance());
    }
    state
}

struct Idle;

impl OrderSource for Idle {
    fn generate_orders(&mut self, _state: &GameState, _content: &GameContent) -> TurnOrders {
        TurnOrders::advance_only()
    }
}

#[test]
fn autopilot_finishes_more_tasks_than_an_idle_fleet() {
    let content = shipped_content();
    let mut autopilot = AutopilotController::default();

    let mut managed_total = 0;
    let mut idle_total = 0;
    for seed in 0..8 {
        managed_total += play(&mut autopilot, &content, seed).stats.tasks_completed;
        idle_total += play(&mut Idle, &content, seed).stats.tasks_completed;
    }

    assert_eq!(idle_total, 0);
    assert!(
        managed_total >= 8 * 5,
        "autopilot completed only {managed_total} tasks over 8 games"
    );
}

#[test]
fn autopilot_games_end_with_a_verdict_and_tips() {
    let content = shipped_content();
    let mut autopilot = AutopilotController::default();

    for seed in 0..8 {
        let state = play(&mut autopilot, &content, seed);
        let outcome = evaluate_game_status(&state);
        assert!(outcome.is_over(), "seed {seed}");
        assert!(state.meta.turn <= content.constants.max_turns + 1);

        let tips = strategic_tips(&state);
        let messages = get_strategic_tips(&state);
        assert_eq!(tips.len(), messages.len());
        let json = serde_json::to_value(&tips).unwrap();
        assert!(json.is_array());
    }
}

use rand::Rng;

use crate::actions::apply_actions;
use crate::hazards::{charge_operations, drift_satellites, roll_collision, roll_emergency};
use crate::tasks::{expire_tasks, generate_tasks, resolve_assignments};
use crate::{GameContent, GameState, TurnOrders};

/// Produce the next game state from `state` and the player's orders.
///
/// `state` is never modified; the returned value is an independent snapshot.
///
/// Order of operations:
/// 1. Apply satellite actions in submission order.
/// 2. Resolve task assignments in submission order.
/// 3. If `orders.advance`:
///    expire overdue tasks, charge operating costs, drift active satellites,
///    offer new tasks, roll for an emergency, roll for a collision, and
///    increment the turn.
///
/// Random draws happen in a fixed order: one per IMAGING action; then, when
/// advancing, three per active satellite (fuel, risk, efficiency decay), one
/// per offered task, one for the emergency, and one for the collision plus
/// one more to pick the victim on a hit.
pub fn step_turn(
    state: &GameState,
    orders: &TurnOrders,
    content: &GameContent,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    apply_turn(&mut next, orders, content, rng);
    next
}

fn apply_turn(
    state: &mut GameState,
    orders: &TurnOrders,
    content: &GameContent,
    rng: &mut impl Rng,
) {
    apply_actions(state, &orders.actions, content, rng);
    resolve_assignments(state, &orders.assignments, content);
    if orders.advance {
        advance(state, content, rng);
    }
}

fn advance(state: &mut GameState, content: &GameContent, rng: &mut impl Rng) {
    let c = &content.constants;
    expire_tasks(state);
    charge_operations(state, c);
    drift_satellites(state, c, rng);
    generate_tasks(state, content, rng);
    roll_emergency(state, c, rng);
    roll_collision(state, c, rng);

    state.meta.turn += 1;
    tracing::debug!(
        game_id = %state.meta.id,
        turn = state.meta.turn,
        budget = state.budget,
        active = state.active_count(),
        tasks = state.tasks.len(),
        "turn advanced"
    );
}

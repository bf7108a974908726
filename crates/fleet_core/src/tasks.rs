//! Task lifecycle: assignment resolution, expiry, and generation.

use rand::Rng;

use crate::dice::pick;
use crate::factory::new_task;
use crate::id::next_task_id;
use crate::ledger::{credit, debit};
use crate::{Assignment, Constants, Event, GameContent, GameState, Satellite, Task};

/// Phase B. Each assignment removes its task exactly once, whatever the
/// result. Assignments naming a missing task, a missing satellite, or a
/// failed satellite are skipped.
pub(crate) fn resolve_assignments(
    state: &mut GameState,
    assignments: &[Assignment],
    content: &GameContent,
) {
    for assignment in assignments {
        let Some(task_index) = state.tasks.iter().position(|t| t.id == assignment.task_id) else {
            continue;
        };
        let Some(sat_index) = state
            .satellites
            .iter()
            .position(|s| s.id == assignment.satellite_id && s.is_active())
        else {
            continue;
        };

        let task = state.tasks.remove(task_index);
        let satellite_id = state.satellites[sat_index].id.clone();
        let fuel_available = state.satellites[sat_index].fuel;

        if fuel_available < task.fuel {
            let penalty = task.penalty.abs();
            debit(state, penalty);
            crate::record(
                state,
                Event::TaskFailed {
                    task_id: task.id,
                    title: task.title,
                    satellite_id,
                    penalty,
                    fuel_required: task.fuel,
                    fuel_available,
                },
            );
        } else if task.reward > 0 {
            let payout = task_payout(&task, &state.satellites[sat_index], &content.constants);
            credit(state, payout);
            state.satellites[sat_index].fuel -= task.fuel;
            state.stats.tasks_completed += 1;
            crate::record(
                state,
                Event::TaskCompleted {
                    task_id: task.id,
                    title: task.title,
                    satellite_id,
                    reward: payout,
                },
            );
        } else {
            let c = &content.constants;
            let sat = &mut state.satellites[sat_index];
            sat.collision_risk = (sat.collision_risk - c.safety_task_risk_reduction).max(0.0);
            sat.fuel -= task.fuel;
            state.stats.tasks_completed += 1;
            crate::record(
                state,
                Event::SafetyTaskCompleted {
                    task_id: task.id,
                    title: task.title,
                    satellite_id,
                },
            );
        }
    }
}

/// `reward × efficiency × efficiency bonus × priority bonus`, rounded.
#[allow(clippy::cast_possible_truncation)]
pub fn task_payout(task: &Task, satellite: &Satellite, c: &Constants) -> i64 {
    let efficiency_bonus = if satellite.efficiency > c.high_efficiency_threshold {
        c.high_efficiency_bonus
    } else {
        1.0
    };
    (task.reward as f64
        * f64::from(satellite.efficiency)
        * efficiency_bonus
        * task.priority.reward_multiplier())
    .round() as i64
}

/// Advance step 1: drop every task whose deadline has been reached and charge
/// its penalty.
pub(crate) fn expire_tasks(state: &mut GameState) {
    let turn = state.meta.turn;
    let (expired, remaining): (Vec<Task>, Vec<Task>) = std::mem::take(&mut state.tasks)
        .into_iter()
        .partition(|task| task.deadline <= turn);
    state.tasks = remaining;

    for task in expired {
        let penalty = task.penalty.abs();
        debit(state, penalty);
        crate::record(
            state,
            Event::TaskExpired {
                task_id: task.id,
                title: task.title,
                penalty,
            },
        );
    }
}

/// Number of tasks offered at the end of `turn`.
pub fn tasks_offered(turn: u64, c: &Constants) -> usize {
    if turn > c.late_game_turn {
        2
    } else {
        1
    }
}

/// Advance step 4: draw new tasks uniformly from the catalog.
pub(crate) fn generate_tasks(state: &mut GameState, content: &GameContent, rng: &mut impl Rng) {
    if content.task_templates.is_empty() {
        return;
    }
    let turn = state.meta.turn;
    for _ in 0..tasks_offered(turn, &content.constants) {
        let template = &content.task_templates[pick(rng, content.task_templates.len())];
        let id = next_task_id(&mut state.counters);
        state.tasks.push(new_task(template, id, turn));
    }
}

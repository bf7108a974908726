//! Entity factories: satellites, tasks, and the opening game state.

use rand::Rng;

use crate::dice::uniform;
use crate::id::{generate_game_id, next_task_id};
use crate::{
    Counters, FleetStats, GameContent, GameError, GameState, MetaState, Satellite, SatelliteId,
    SatelliteStatus, Task, TaskId, TaskTemplate,
};

/// Upper bound on fleet size at creation.
pub const MAX_SATELLITES: i64 = 64;

pub const SCHEMA_VERSION: u32 = 1;

/// Satellite `index` is 1-based: index 1 becomes `SAT-1`.
pub fn new_satellite(index: usize, content: &GameContent, rng: &mut impl Rng) -> Satellite {
    let c = &content.constants;
    Satellite {
        id: SatelliteId(format!("SAT-{index}")),
        status: SatelliteStatus::Active,
        fuel: 100.0,
        collision_risk: uniform(rng, c.satellite_risk_min, c.satellite_risk_max),
        efficiency: uniform(rng, c.satellite_efficiency_min, c.satellite_efficiency_max),
    }
}

/// Instantiate a template created on `turn`.
pub fn new_task(template: &TaskTemplate, id: TaskId, turn: u64) -> Task {
    Task {
        id,
        title: template.title.clone(),
        category: template.category,
        priority: template.priority,
        reward: template.reward,
        penalty: template.penalty,
        fuel: template.fuel,
        deadline: turn + template.duration,
    }
}

/// Build a fresh game at turn 1 with the starter task set and
/// `satellite_count` new satellites.
pub fn create_initial_state(
    budget: i64,
    satellite_count: i64,
    content: &GameContent,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    if !(0..=MAX_SATELLITES).contains(&satellite_count) {
        return Err(GameError::InvalidSatelliteCount(satellite_count));
    }
    if budget < 0 {
        return Err(GameError::InvalidBudget(budget));
    }
    let catalog_len = content.task_templates.len();
    if let Some(&index) = content.starter_tasks.iter().find(|&&i| i >= catalog_len) {
        return Err(GameError::StarterTaskOutOfRange { index, catalog_len });
    }

    let id = generate_game_id(rng);
    let turn = 1;

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let satellites = (1..=satellite_count as usize)
        .map(|index| new_satellite(index, content, rng))
        .collect();

    let mut counters = Counters::default();
    let tasks = content
        .starter_tasks
        .iter()
        .map(|&index| {
            let task_id = next_task_id(&mut counters);
            new_task(&content.task_templates[index], task_id, turn)
        })
        .collect();

    tracing::debug!(game_id = %id, budget, satellite_count, "created game");

    Ok(GameState {
        meta: MetaState {
            id,
            turn,
            max_turns: content.constants.max_turns,
            initial_budget: budget,
            schema_version: SCHEMA_VERSION,
            content_version: content.content_version.clone(),
        },
        budget,
        satellites,
        tasks,
        history: Vec::new(),
        stats: FleetStats::default(),
        counters,
    })
}

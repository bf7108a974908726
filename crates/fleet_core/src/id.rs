use rand::Rng;
use uuid::Uuid;

use crate::{Counters, GameId, TaskId};

/// Generate a deterministic v4-format UUID from the passed-in RNG.
pub fn generate_uuid(rng: &mut impl Rng) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

pub(crate) fn generate_game_id(rng: &mut impl Rng) -> GameId {
    GameId(generate_uuid(rng))
}

/// Task ids come from a counter so they never repeat within a game and never
/// consume random draws.
pub(crate) fn next_task_id(counters: &mut Counters) -> TaskId {
    counters.next_task_id += 1;
    TaskId(format!("task_{:04}", counters.next_task_id))
}

//! Shared test fixtures for fleet_core and downstream crates.
//!
//! `base_content()` is the standard catalog and constants. `base_state()`
//! builds a fixed four-satellite game without touching an RNG, and
//! `ScriptedRng` replays a fixed sequence of [0, 1) draws so tests can pick
//! each random branch.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::factory::{new_task, SCHEMA_VERSION};
use crate::{
    Counters, FleetStats, GameContent, GameId, GameState, MetaState, Satellite, SatelliteId,
    SatelliteStatus, TaskId,
};

pub fn base_content() -> GameContent {
    GameContent::standard()
}

/// Turn 1, budget 65 000, satellites SAT-1..SAT-4 at full fuel with
/// risk 0.1 and efficiency 0.8, and the starter tasks from `content`.
pub fn base_state(content: &GameContent) -> GameState {
    let satellites = (1..=4)
        .map(|index| Satellite {
            id: SatelliteId(format!("SAT-{index}")),
            status: SatelliteStatus::Active,
            fuel: 100.0,
            collision_risk: 0.1,
            efficiency: 0.8,
        })
        .collect();

    let mut counters = Counters::default();
    let tasks = content
        .starter_tasks
        .iter()
        .map(|&index| {
            counters.next_task_id += 1;
            let id = TaskId(format!("task_{:04}", counters.next_task_id));
            new_task(&content.task_templates[index], id, 1)
        })
        .collect();

    GameState {
        meta: MetaState {
            id: GameId(Uuid::nil()),
            turn: 1,
            max_turns: content.constants.max_turns,
            initial_budget: 65_000,
            schema_version: SCHEMA_VERSION,
            content_version: content.content_version.clone(),
        },
        budget: 65_000,
        satellites,
        tasks,
        history: Vec::new(),
        stats: FleetStats::default(),
        counters,
    }
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Replays scripted draws through `Rng::gen::<f64>()`, then repeats the
/// fallback (0.5 unless changed) once the script runs out.
///
/// A draw `v` is encoded into the top 53 bits of `next_u64`, which is exactly
/// what `rand`'s `Standard` f64 sampling reads back.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        ScriptedRng {
            draws: draws.iter().copied().collect(),
            fallback: 0.5,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn encode(draw: f64) -> u64 {
        let scale = (1_u64 << 53) as f64;
        let mantissa = (draw.clamp(0.0, 1.0) * scale) as u64;
        mantissa.min((1_u64 << 53) - 1) << 11
    }
}

impl rand::RngCore for ScriptedRng {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let draw = self.draws.pop_front().unwrap_or(self.fallback);
        Self::encode(draw)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

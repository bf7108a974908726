use std::collections::HashMap;
use std::sync::Arc;

use fleet_core::{create_initial_state, GameContent, GameId, GameState};
use fleet_world::GameRepository;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::ApiError;

/// Held for the whole load → step → save of one game.
pub type GameLock = Arc<Mutex<()>>;

/// Fresh ids drawn before giving up on finding one not already stored.
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn GameRepository>,
    pub content: Arc<GameContent>,
    /// Drawn from only when creating games.
    creation_rng: Arc<Mutex<ChaCha8Rng>>,
    seed: u64,
    locks: Arc<Mutex<HashMap<GameId, GameLock>>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn GameRepository>, content: GameContent, seed: u64) -> Self {
        Self {
            repo,
            content: Arc::new(content),
            creation_rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
            seed,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn game_lock(&self, id: GameId) -> GameLock {
        Arc::clone(self.locks.lock().entry(id).or_default())
    }

    /// Hands back a lock from `game_lock`, forgetting the entry once no
    /// other request holds it.
    pub fn release_game_lock(&self, id: GameId, lock: GameLock) {
        let mut locks = self.locks.lock();
        drop(lock);
        if locks.get(&id).is_some_and(|entry| Arc::strong_count(entry) == 1) {
            locks.remove(&id);
        }
    }

    #[cfg(test)]
    pub fn tracked_games(&self) -> usize {
        self.locks.lock().len()
    }

    /// Creates and stores a new game under an id no stored game uses.
    ///
    /// A restarted daemon with the same seed and data dir draws the same ids
    /// again, so taken ids are skipped rather than overwritten.
    pub fn create_game(&self, budget: i64, satellites: i64) -> Result<GameState, ApiError> {
        let mut rng = self.creation_rng.lock();
        for _ in 0..MAX_ID_ATTEMPTS {
            let state = create_initial_state(budget, satellites, &self.content, &mut *rng)
                .map_err(ApiError::InvalidGame)?;
            let id = state.meta.id;
            if self.repo.load(id).map_err(ApiError::Storage)?.is_some() {
                tracing::warn!(game_id = %id, "game id already stored, drawing another");
                continue;
            }
            self.save(&state)?;
            return Ok(state);
        }
        Err(ApiError::Storage(anyhow::anyhow!(
            "no free game id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    pub fn load(&self, id: GameId) -> Result<GameState, ApiError> {
        self.repo
            .load(id)
            .map_err(ApiError::Storage)?
            .ok_or(ApiError::GameNotFound(id))
    }

    pub fn save(&self, state: &GameState) -> Result<(), ApiError> {
        self.repo.save(state).map_err(ApiError::Storage)
    }

    /// Dice for one step of `state`. Seeded by the daemon seed and game id;
    /// the stream is picked by turn and event counter, so every request that
    /// changed the game moves on to fresh draws.
    #[allow(clippy::cast_possible_truncation)]
    pub fn turn_rng(&self, state: &GameState) -> ChaCha8Rng {
        let game_bits = state.meta.id.0.as_u128() as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ game_bits);
        rng.set_stream((state.meta.turn << 32) | (state.counters.next_event_id & 0xFFFF_FFFF));
        rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::test_fixtures::{base_content, base_state};
    use fleet_world::{InMemoryRepository, JsonDirRepository};
    use rand::Rng;

    fn make_app_state() -> AppState {
        AppState::new(Arc::new(InMemoryRepository::new()), base_content(), 7)
    }

    #[test]
    fn test_turn_rng_moves_on_with_event_counter() {
        let app_state = make_app_state();
        let state = base_state(&app_state.content);
        let mut stepped = state.clone();
        stepped.counters.next_event_id += 1;

        let first: u64 = app_state.turn_rng(&state).gen();
        assert_eq!(first, app_state.turn_rng(&state).gen::<u64>());
        assert_ne!(first, app_state.turn_rng(&stepped).gen::<u64>());
    }

    #[test]
    fn test_turn_rng_differs_between_turns() {
        let app_state = make_app_state();
        let state = base_state(&app_state.content);
        let mut next_turn = state.clone();
        next_turn.meta.turn += 1;

        assert_ne!(
            app_state.turn_rng(&state).gen::<u64>(),
            app_state.turn_rng(&next_turn).gen::<u64>()
        );
    }

    #[test]
    fn test_restart_with_same_seed_keeps_existing_games() {
        let dir = tempfile::tempdir().unwrap();
        let first_run = AppState::new(
            Arc::new(JsonDirRepository::new(dir.path()).unwrap()),
            base_content(),
            7,
        );
        let kept = first_run.create_game(11_111, 4).unwrap();

        let second_run = AppState::new(
            Arc::new(JsonDirRepository::new(dir.path()).unwrap()),
            base_content(),
            7,
        );
        let added = second_run.create_game(22_222, 4).unwrap();

        assert_ne!(kept.meta.id, added.meta.id);
        assert_eq!(second_run.repo.list().unwrap().len(), 2);
        assert_eq!(second_run.load(kept.meta.id).unwrap().budget, 11_111);
        assert_eq!(second_run.load(added.meta.id).unwrap().budget, 22_222);
    }

    #[test]
    fn test_creation_rejects_invalid_input_without_storing() {
        let app_state = make_app_state();
        let err = app_state.create_game(65_000, -1).unwrap_err();
        assert!(matches!(err, ApiError::InvalidGame(_)));
        assert!(app_state.repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_released_lock_entry_is_forgotten() {
        let app_state = make_app_state();
        let id = base_state(&app_state.content).meta.id;

        let first = app_state.game_lock(id);
        let second = app_state.game_lock(id);
        app_state.release_game_lock(id, first);
        assert_eq!(app_state.tracked_games(), 1);
        app_state.release_game_lock(id, second);
        assert_eq!(app_state.tracked_games(), 0);
    }
}

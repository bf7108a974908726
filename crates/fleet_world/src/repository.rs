//! Game snapshot persistence keyed by game id.
//!
//! The engine never touches storage; callers load a snapshot, step it, and
//! save the result back through a `GameRepository`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fleet_core::{GameId, GameState};
use parking_lot::Mutex;

pub trait GameRepository: Send + Sync {
    /// `Ok(None)` when no game with `id` has been saved.
    fn load(&self, id: GameId) -> Result<Option<GameState>>;
    /// Insert or replace the snapshot stored under `state.meta.id`.
    fn save(&self, state: &GameState) -> Result<()>;
    /// Stored game ids, sorted.
    fn list(&self) -> Result<Vec<GameId>>;
}

/// One pretty-printed JSON file per game, `<dir>/<game id>.json`.
pub struct JsonDirRepository {
    dir: PathBuf,
}

impl JsonDirRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: GameId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl GameRepository for JsonDirRepository {
    fn load(&self, id: GameId) -> Result<Option<GameState>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let state =
            serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let path = self.path_for(state.meta.id);
        // Write then rename so a reader never sees a half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(state).context("serializing game state")?;
        std::fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("moving {} into place", path.display()))?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<GameId>> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("listing {}", self.dir.display()))?;
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry.context("reading directory entry")?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<GameId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_by_key(|id| id.0);
        Ok(ids)
    }
}

#[derive(Default)]
pub struct InMemoryRepository {
    games: Mutex<HashMap<GameId, GameState>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameRepository for InMemoryRepository {
    fn load(&self, id: GameId) -> Result<Option<GameState>> {
        Ok(self.games.lock().get(&id).cloned())
    }

    fn save(&self, state: &GameState) -> Result<()> {
        self.games.lock().insert(state.meta.id, state.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<GameId>> {
        let mut ids: Vec<GameId> = self.games.lock().keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        Ok(ids)
    }
}

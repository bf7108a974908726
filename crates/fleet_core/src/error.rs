//! Error types for the turn engine.
//!
//! Expected game outcomes (bankruptcy, lost satellites, expired tasks) are
//! state, not errors. Only invalid caller input lands here.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Satellite count outside the accepted range at game creation.
    #[error("invalid satellite count {0} (expected 0..={})", crate::factory::MAX_SATELLITES)]
    InvalidSatelliteCount(i64),

    /// Starting budget below zero.
    #[error("invalid starting budget {0}: must not be negative")]
    InvalidBudget(i64),

    /// A starter task points outside the task catalog.
    #[error("starter task index {index} is outside the catalog ({catalog_len} templates)")]
    StarterTaskOutOfRange { index: usize, catalog_len: usize },

    /// Action name that is not one of REFUEL, CAM, IMAGING, MAINTENANCE.
    #[error("unknown satellite action '{0}'")]
    UnknownAction(String),
}

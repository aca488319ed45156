//! Error types for inventory session tracking.

use horizon_plugin_core::PlayerId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The operation needs an open view but none is tracked for the player
    #[error("No inventory view is open for player {0}")]
    NotFound(PlayerId),
}

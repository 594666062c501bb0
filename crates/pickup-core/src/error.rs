// Error types surfaced by the balancing engine.

use thiserror::Error;

/// Structural problems with a balance request. Detected before any team is
/// constructed; the caller must fix the request rather than retry it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid players data")]
    InvalidPlayersData,

    #[error("Invalid number of teams")]
    InvalidNumberOfTeams,

    #[error("No valid players provided")]
    NoValidPlayers,
}

/// Failures when moving a player between already-allocated teams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("team index {index} out of range ({count} teams)")]
    TeamOutOfRange { index: usize, count: usize },

    #[error("player `{player_id}` not found on team {team}")]
    PlayerNotFound { player_id: String, team: usize },
}

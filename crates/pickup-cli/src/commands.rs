// Command implementations shared by the binary and integration tests.

use std::path::Path;

use chrono::{DateTime, Utc};
use pickup_core::{
    balance_with, move_player, Allocation, Fudge, MoveError, NoFudge, RandomFudge,
    ValidationError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::roster::{self, RosterError};

/// Exit status for requests the caller must fix before retrying.
pub const EXIT_BAD_REQUEST: u8 = 2;
/// Exit status for everything else.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Validation(_) | CommandError::Move(_) => EXIT_BAD_REQUEST,
            CommandError::Roster(_) => EXIT_FAILURE,
        }
    }
}

/// What gets printed: the allocation stamped with its generation time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub allocation: Allocation,
}

impl Report {
    pub fn new(allocation: Allocation) -> Self {
        Report {
            generated_at: Utc::now(),
            allocation,
        }
    }
}

/// How composite-score randomness is sourced for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FudgeMode {
    Random,
    Seeded(u64),
    Off,
}

impl FudgeMode {
    pub fn from_flags(seed: Option<u64>, no_fudge: bool) -> Self {
        match (no_fudge, seed) {
            (true, _) => FudgeMode::Off,
            (false, Some(seed)) => FudgeMode::Seeded(seed),
            (false, None) => FudgeMode::Random,
        }
    }
}

/// Load a roster and balance it.
pub fn balance_command(
    roster_path: &Path,
    teams: Option<i64>,
    mode: FudgeMode,
    config: &Config,
) -> Result<Report, CommandError> {
    let request = roster::load_request(roster_path)?;
    let num_teams = request.resolve_num_teams(teams, config.default_teams);
    info!(
        "Balancing {} into {:?} teams ({:?})",
        roster_path.display(),
        num_teams,
        mode
    );

    let range = config.engine.fudge_range;
    let allocation = match mode {
        FudgeMode::Random => {
            run(&request.players, num_teams, config, RandomFudge::thread_local(range))
        }
        FudgeMode::Seeded(seed) => {
            run(&request.players, num_teams, config, RandomFudge::seeded(range, seed))
        }
        FudgeMode::Off => run(&request.players, num_teams, config, NoFudge),
    }?;
    Ok(Report::new(allocation))
}

fn run(
    players: &serde_json::Value,
    num_teams: Option<i64>,
    config: &Config,
    mut fudge: impl Fudge,
) -> Result<Allocation, ValidationError> {
    balance_with(players, num_teams, &config.engine, &mut fudge)
}

/// Move one player between teams of a saved allocation.
pub fn move_command(
    allocation_path: &Path,
    player_id: &str,
    from: usize,
    to: usize,
) -> Result<Report, CommandError> {
    let mut allocation = roster::load_allocation(allocation_path)?;
    move_player(&mut allocation.teams, player_id, from, to)?;
    info!("Moved {} from team {} to team {}", player_id, from, to);
    Ok(Report::new(allocation))
}

// Team balancing engine: splits a weekly roster into size-, skill- and
// gender-balanced teams, and keeps team aggregates correct after manual moves.
//
// Pipeline: sanitize -> score -> prioritize -> allocate. `team::recompute`
// is also exposed on its own for post-allocation corrections.

pub mod allocate;
pub mod error;
pub mod player;
pub mod priority;
pub mod round2;
pub mod sanitize;
pub mod score;
pub mod team;

use serde_json::Value;
use tracing::info;

pub use allocate::{allocate, Allocation};
pub use error::{MoveError, ValidationError};
pub use player::{Gender, PlayerRecord, ScoredPlayer, Skill, Skills};
pub use priority::prioritize;
pub use sanitize::{sanitize, Roster, MAX_TEAMS, MIN_TEAMS};
pub use score::{
    score, EngineSettings, Fudge, NoFudge, RandomFudge, ScoreWeights, MAX_FUDGE_RANGE,
};
pub use team::{move_player, recompute, GenderCount, Team};

/// Balance `players` into `num_teams` teams with the default weights and an
/// unseeded random fudge.
pub fn balance(players: &Value, num_teams: Option<i64>) -> Result<Allocation, ValidationError> {
    let settings = EngineSettings::default();
    let mut fudge = RandomFudge::thread_local(settings.fudge_range);
    balance_with(players, num_teams, &settings, &mut fudge)
}

/// Balance with explicit settings and randomness source.
///
/// Either returns a complete allocation or fails before any team exists.
pub fn balance_with(
    players: &Value,
    num_teams: Option<i64>,
    settings: &EngineSettings,
    fudge: &mut impl Fudge,
) -> Result<Allocation, ValidationError> {
    let roster = sanitize(players, num_teams)?;
    let num_teams = roster.num_teams();

    let scored: Vec<ScoredPlayer> = roster
        .players
        .into_iter()
        .map(|record| {
            let composite_score = score(&record.skills, &settings.weights, &mut *fudge);
            ScoredPlayer {
                record,
                composite_score,
            }
        })
        .collect();

    let allocation = allocate(prioritize(scored), num_teams);
    info!(
        "balanced {} players into {} teams (sizes {:?})",
        allocation.total_players_playing,
        num_teams,
        allocation.team_sizes()
    );
    Ok(allocation)
}

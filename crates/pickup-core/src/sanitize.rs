// Roster validation and coercion: reduces raw input to valid, available players.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::player::{is_valid_skill, Gender, PlayerRecord, Skill, Skills};

/// Smallest team count a balance request may ask for.
pub const MIN_TEAMS: i64 = 2;

/// Largest team count a balance request may ask for. Every team is built up
/// front, so the count has to stay small enough to allocate.
pub const MAX_TEAMS: i64 = 1_000;

/// The sanitized, available-only roster plus the validated team count.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub players: Vec<PlayerRecord>,
    num_teams: usize,
}

impl Roster {
    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn total_players_playing(&self) -> usize {
        self.players.len()
    }
}

/// Why an individual entry was left out. Never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NotAnObject,
    BadSkill(Skill),
    BadGender,
}

/// Validate the request shape and reduce `players` to the valid entries
/// whose `isPlayingThisWeek` is truthy.
///
/// Shape errors on `players` are reported before `num_teams` is checked.
/// Malformed entries are dropped silently.
pub fn sanitize(players: &Value, num_teams: Option<i64>) -> Result<Roster, ValidationError> {
    let entries = players
        .as_array()
        .ok_or(ValidationError::InvalidPlayersData)?;

    let num_teams = match num_teams {
        Some(n) if (MIN_TEAMS..=MAX_TEAMS).contains(&n) => {
            usize::try_from(n).map_err(|_| ValidationError::InvalidNumberOfTeams)?
        }
        _ => return Err(ValidationError::InvalidNumberOfTeams),
    };

    let mut kept = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    let mut benched = 0usize;

    for (idx, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Ok(record) if record.is_playing_this_week => kept.push(record),
            Ok(_) => benched += 1,
            Err(reason) => {
                debug!("dropping roster entry {}: {:?}", idx, reason);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!("dropped {} malformed roster entries", dropped);
    }
    debug!(
        "sanitized roster: {} playing, {} not playing this week",
        kept.len(),
        benched
    );

    if kept.is_empty() {
        return Err(ValidationError::NoValidPlayers);
    }

    Ok(Roster {
        players: kept,
        num_teams,
    })
}

fn parse_entry(entry: &Value) -> Result<PlayerRecord, Rejection> {
    let obj = entry.as_object().ok_or(Rejection::NotAnObject)?;

    let mut skills = Skills {
        game_knowledge: 0.0,
        goal_scoring: 0.0,
        attack: 0.0,
        midfield: 0.0,
        defense: 0.0,
        fitness: 0.0,
    };
    for skill in Skill::ALL {
        let value = obj
            .get(skill.field_name())
            .and_then(coerce_number)
            .filter(|&v| is_valid_skill(v))
            .ok_or(Rejection::BadSkill(skill))?;
        skills.set(skill, value);
    }

    let gender = obj
        .get("gender")
        .and_then(Value::as_str)
        .and_then(Gender::from_wire)
        .ok_or(Rejection::BadGender)?;

    Ok(PlayerRecord {
        id: identity(obj),
        name: obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        skills,
        gender,
        is_playing_this_week: obj.get("isPlayingThisWeek").is_some_and(is_truthy),
    })
}

/// Numbers pass through; strings are parsed after trimming. Anything else,
/// and any non-finite result, is rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Accepted "playing" representations: `true`, `"true"`, and the number 1.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

fn identity(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

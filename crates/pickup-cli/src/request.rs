// Balance request normalization: the body-shape quirks handled before the
// roster reaches the engine.

use serde_json::Value;
use tracing::debug;

/// How the request specified the team count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamCount {
    Absent,
    Given(i64),
    /// Present but not an integer (an explicit `null` included). The engine
    /// will reject it.
    Invalid,
}

/// A balance request after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRequest {
    pub players: Value,
    pub num_teams: TeamCount,
}

impl BalanceRequest {
    /// Interpret a request body.
    ///
    /// - An array is taken as the player list itself.
    /// - An object supplies `players` and `numTeams`. A string `players` is
    ///   decoded as JSON first; if that fails the string is passed through
    ///   unchanged so the engine reports it.
    /// - Anything else yields a null player list.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Array(_) => BalanceRequest {
                players: body,
                num_teams: TeamCount::Absent,
            },
            Value::Object(mut obj) => {
                let players = obj
                    .remove("players")
                    .map(decode_players)
                    .unwrap_or(Value::Null);
                let num_teams = match obj.get("numTeams") {
                    None => TeamCount::Absent,
                    Some(v) => parse_team_count(v).map_or(TeamCount::Invalid, TeamCount::Given),
                };
                BalanceRequest { players, num_teams }
            }
            _ => BalanceRequest {
                players: Value::Null,
                num_teams: TeamCount::Absent,
            },
        }
    }

    /// Pick the team count: explicit override, then the request, then the
    /// configured default. `None` means the request carried an unusable value.
    pub fn resolve_num_teams(
        &self,
        override_teams: Option<i64>,
        default_teams: usize,
    ) -> Option<i64> {
        if override_teams.is_some() {
            return override_teams;
        }
        match self.num_teams {
            TeamCount::Given(n) => Some(n),
            TeamCount::Invalid => None,
            TeamCount::Absent => i64::try_from(default_teams).ok(),
        }
    }
}

fn decode_players(players: Value) -> Value {
    match players {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(decoded) => {
                debug!("decoded JSON-encoded players field");
                decoded
            }
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Integers, integral floats, and strings holding an integer.
fn parse_team_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

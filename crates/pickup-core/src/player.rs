// Player records: identity, the six skill ratings, gender, availability.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::round2;

/// Lowest accepted skill rating.
pub const MIN_SKILL: f64 = 1.0;
/// Highest accepted skill rating.
pub const MAX_SKILL: f64 = 10.0;

/// Gender values recognized by the balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::NonBinary];

    /// Parse the wire representation. Matching is exact.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "nonBinary" => Some(Gender::NonBinary),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "nonBinary",
        }
    }

    /// Female and non-binary players are placed before male players.
    pub fn is_priority_cohort(&self) -> bool {
        !matches!(self, Gender::Male)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// The six skill attributes, each in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub game_knowledge: f64,
    pub goal_scoring: f64,
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub fitness: f64,
}

/// Identifies one of the six skill attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    GameKnowledge,
    GoalScoring,
    Attack,
    Midfield,
    Defense,
    Fitness,
}

impl Skill {
    pub const ALL: [Skill; 6] = [
        Skill::GameKnowledge,
        Skill::GoalScoring,
        Skill::Attack,
        Skill::Midfield,
        Skill::Defense,
        Skill::Fitness,
    ];

    /// JSON field name on a player record.
    pub fn field_name(&self) -> &'static str {
        match self {
            Skill::GameKnowledge => "gameKnowledge",
            Skill::GoalScoring => "goalScoring",
            Skill::Attack => "attack",
            Skill::Midfield => "midfield",
            Skill::Defense => "defense",
            Skill::Fitness => "fitness",
        }
    }
}

impl Skills {
    pub fn get(&self, skill: Skill) -> f64 {
        match skill {
            Skill::GameKnowledge => self.game_knowledge,
            Skill::GoalScoring => self.goal_scoring,
            Skill::Attack => self.attack,
            Skill::Midfield => self.midfield,
            Skill::Defense => self.defense,
            Skill::Fitness => self.fitness,
        }
    }

    pub fn set(&mut self, skill: Skill, value: f64) {
        match skill {
            Skill::GameKnowledge => self.game_knowledge = value,
            Skill::GoalScoring => self.goal_scoring = value,
            Skill::Attack => self.attack = value,
            Skill::Midfield => self.midfield = value,
            Skill::Defense => self.defense = value,
            Skill::Fitness => self.fitness = value,
        }
    }
}

/// Whether a single rating lies within `[MIN_SKILL, MAX_SKILL]`.
pub fn is_valid_skill(value: f64) -> bool {
    (MIN_SKILL..=MAX_SKILL).contains(&value)
}

/// A player as supplied by the roster layer, after sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub skills: Skills,
    pub gender: Gender,
    #[serde(default)]
    pub is_playing_this_week: bool,
}

/// A player carrying the composite score computed for this invocation.
///
/// The score is a snapshot: team recomputation reads it back instead of
/// re-scoring, so a player's number stays put across manual moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    #[serde(serialize_with = "round2::serialize")]
    pub composite_score: f64,
}

impl ScoredPlayer {
    pub fn gender(&self) -> Gender {
        self.record.gender
    }

    pub fn id(&self) -> Option<&str> {
        self.record.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(v: f64) -> Skills {
        Skills {
            game_knowledge: v,
            goal_scoring: v,
            attack: v,
            midfield: v,
            defense: v,
            fitness: v,
        }
    }

    #[test]
    fn gender_wire_names_round_trip() {
        for g in Gender::ALL {
            assert_eq!(Gender::from_wire(g.as_wire()), Some(g));
        }
        assert_eq!(Gender::from_wire("Male"), None);
        assert_eq!(Gender::from_wire("non-binary"), None);
    }

    #[test]
    fn priority_cohort_is_non_male() {
        assert!(!Gender::Male.is_priority_cohort());
        assert!(Gender::Female.is_priority_cohort());
        assert!(Gender::NonBinary.is_priority_cohort());
    }

    #[test]
    fn skill_bounds_are_inclusive() {
        assert!(is_valid_skill(1.0));
        assert!(is_valid_skill(10.0));
        assert!(is_valid_skill(6.5));
        assert!(!is_valid_skill(0.99));
        assert!(!is_valid_skill(10.5));
        assert!(!is_valid_skill(f64::NAN));
    }

    #[test]
    fn skills_get_set_by_attribute() {
        let mut s = skills(5.0);
        s.set(Skill::Fitness, 9.0);
        assert_eq!(s.get(Skill::Fitness), 9.0);
        assert_eq!(s.get(Skill::Defense), 5.0);
    }

    #[test]
    fn scored_player_serializes_flat_with_rounded_score() {
        let p = ScoredPlayer {
            record: PlayerRecord {
                id: Some("p1".into()),
                name: "Ana".into(),
                skills: skills(7.0),
                gender: Gender::NonBinary,
                is_playing_this_week: true,
            },
            composite_score: 5.04567,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["gameKnowledge"], 7.0);
        assert_eq!(json["gender"], "nonBinary");
        assert_eq!(json["isPlayingThisWeek"], true);
        assert_eq!(json["compositeScore"], 5.05);
    }

    #[test]
    fn scored_player_deserializes_from_wire() {
        let json = serde_json::json!({
            "id": "p9",
            "name": "Bo",
            "gameKnowledge": 4, "goalScoring": 5, "attack": 6,
            "midfield": 7, "defense": 8, "fitness": 9,
            "gender": "male",
            "isPlayingThisWeek": true,
            "compositeScore": 4.12
        });
        let p: ScoredPlayer = serde_json::from_value(json).unwrap();
        assert_eq!(p.id(), Some("p9"));
        assert_eq!(p.record.skills.fitness, 9.0);
        assert_eq!(p.gender(), Gender::Male);
        assert!((p.composite_score - 4.12).abs() < 1e-12);
    }
}

// Teams and their aggregates: per-skill sums, composite sum, gender counts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MoveError;
use crate::player::{Gender, ScoredPlayer, Skill};
use crate::round2;

/// Number of players of each gender on a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderCount {
    pub male: usize,
    pub female: usize,
    pub non_binary: usize,
}

impl GenderCount {
    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::NonBinary => self.non_binary,
        }
    }

    fn increment(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::NonBinary => self.non_binary += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female + self.non_binary
    }
}

/// A team: its players and the aggregates derived from them.
///
/// Aggregates are only ever produced by [`Team::assign`] or [`recompute`];
/// aggregate fields on deserialized input are overwritten by `recompute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub players: Vec<ScoredPlayer>,
    #[serde(default, serialize_with = "round2::serialize")]
    pub game_knowledge_score: f64,
    #[serde(default, serialize_with = "round2::serialize")]
    pub goal_scoring_score: f64,
    #[serde(default, serialize_with = "round2::serialize")]
    pub attack_score: f64,
    #[serde(default, serialize_with = "round2::serialize")]
    pub midfield_score: f64,
    #[serde(default, serialize_with = "round2::serialize")]
    pub defense_score: f64,
    #[serde(default, serialize_with = "round2::serialize")]
    pub fitness_score: f64,
    /// Sum of the players' composite scores.
    #[serde(default, serialize_with = "round2::serialize")]
    pub total_score: f64,
    #[serde(default)]
    pub gender_count: GenderCount,
}

impl Team {
    pub fn new() -> Self {
        Team::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sum of one skill across the team.
    pub fn skill_sum(&self, skill: Skill) -> f64 {
        match skill {
            Skill::GameKnowledge => self.game_knowledge_score,
            Skill::GoalScoring => self.goal_scoring_score,
            Skill::Attack => self.attack_score,
            Skill::Midfield => self.midfield_score,
            Skill::Defense => self.defense_score,
            Skill::Fitness => self.fitness_score,
        }
    }

    fn skill_sum_mut(&mut self, skill: Skill) -> &mut f64 {
        match skill {
            Skill::GameKnowledge => &mut self.game_knowledge_score,
            Skill::GoalScoring => &mut self.goal_scoring_score,
            Skill::Attack => &mut self.attack_score,
            Skill::Midfield => &mut self.midfield_score,
            Skill::Defense => &mut self.defense_score,
            Skill::Fitness => &mut self.fitness_score,
        }
    }

    /// Add a player and fold their contributions into the aggregates.
    pub fn assign(&mut self, player: ScoredPlayer) {
        for skill in Skill::ALL {
            *self.skill_sum_mut(skill) += player.record.skills.get(skill);
        }
        self.total_score += player.composite_score;
        self.gender_count.increment(player.gender());
        self.players.push(player);
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id() == Some(player_id))
    }
}

/// Rebuild a team's aggregates from its player list.
///
/// Uses each player's stored composite score; nothing is re-scored, so the
/// result is the same however many times it is applied.
pub fn recompute(team: &Team) -> Team {
    team.players
        .iter()
        .cloned()
        .fold(Team::new(), |mut acc, player| {
            acc.assign(player);
            acc
        })
}

/// Move a player between teams and refresh both teams' aggregates.
///
/// `from == to` is accepted as a no-op once both the index and the player
/// have been checked.
pub fn move_player(
    teams: &mut [Team],
    player_id: &str,
    from: usize,
    to: usize,
) -> Result<(), MoveError> {
    let count = teams.len();
    for index in [from, to] {
        if index >= count {
            return Err(MoveError::TeamOutOfRange { index, count });
        }
    }

    let pos = teams[from]
        .players
        .iter()
        .position(|p| p.id() == Some(player_id))
        .ok_or_else(|| MoveError::PlayerNotFound {
            player_id: player_id.to_string(),
            team: from,
        })?;

    if from == to {
        return Ok(());
    }

    let player = teams[from].players.remove(pos);
    teams[to].players.push(player);
    teams[from] = recompute(&teams[from]);
    teams[to] = recompute(&teams[to]);

    debug!(
        "moved player {} from team {} ({} left) to team {} ({} now)",
        player_id,
        from,
        teams[from].len(),
        to,
        teams[to].len()
    );
    Ok(())
}

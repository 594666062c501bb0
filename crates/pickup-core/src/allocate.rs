// Greedy allocation: each player goes to the emptiest, then weakest, team.

use serde::{Deserialize, Serialize};

use crate::player::ScoredPlayer;
use crate::team::Team;

/// Result of a balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub teams: Vec<Team>,
    pub total_players_playing: usize,
}

impl Allocation {
    pub fn team_sizes(&self) -> Vec<usize> {
        self.teams.iter().map(Team::len).collect()
    }

    /// Difference between the largest and smallest team.
    pub fn size_spread(&self) -> usize {
        let sizes = self.team_sizes();
        match (sizes.iter().max(), sizes.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

/// Assign players, in the given order, to `num_teams` fresh teams.
///
/// For each player, only the teams currently tied for the fewest players
/// are eligible; among those the lowest composite-score total wins, and
/// remaining ties go to the lowest team index. Team sizes therefore never
/// differ by more than one. Runs in O(players * teams).
pub fn allocate(ordered: Vec<ScoredPlayer>, num_teams: usize) -> Allocation {
    let mut teams: Vec<Team> = (0..num_teams).map(|_| Team::new()).collect();

    for player in ordered {
        let Some(idx) = pick_team(&teams) else {
            break;
        };
        teams[idx].assign(player);
    }

    let total_players_playing = teams.iter().map(Team::len).sum();
    Allocation {
        teams,
        total_players_playing,
    }
}

/// Index of the team the next player should join, or `None` if there are
/// no teams at all.
fn pick_team(teams: &[Team]) -> Option<usize> {
    let min_size = teams.iter().map(Team::len).min()?;

    let mut best: Option<usize> = None;
    for (idx, team) in teams.iter().enumerate() {
        if team.len() != min_size {
            continue;
        }
        match best {
            Some(b) if teams[b].total_score <= team.total_score => {}
            _ => best = Some(idx),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Gender, PlayerRecord, Skills};
    use crate::priority::prioritize;

    fn scored(id: &str, gender: Gender, score: f64) -> ScoredPlayer {
        ScoredPlayer {
            record: PlayerRecord {
                id: Some(id.into()),
                name: id.into(),
                skills: Skills {
                    game_knowledge: 5.0,
                    goal_scoring: 5.0,
                    attack: 5.0,
                    midfield: 5.0,
                    defense: 5.0,
                    fitness: 5.0,
                },
                gender,
                is_playing_this_week: true,
            },
            composite_score: score,
        }
    }

    fn team_ids(team: &Team) -> Vec<&str> {
        team.players.iter().filter_map(|p| p.id()).collect()
    }

    #[test]
    fn first_players_fill_empty_teams_in_index_order() {
        let alloc = allocate(
            vec![
                scored("a", Gender::Male, 9.0),
                scored("b", Gender::Male, 8.0),
                scored("c", Gender::Male, 7.0),
            ],
            3,
        );
        assert_eq!(team_ids(&alloc.teams[0]), vec!["a"]);
        assert_eq!(team_ids(&alloc.teams[1]), vec!["b"]);
        assert_eq!(team_ids(&alloc.teams[2]), vec!["c"]);
    }

    #[test]
    fn second_round_goes_to_lowest_total() {
        let alloc = allocate(
            vec![
                scored("a", Gender::Male, 9.0),
                scored("b", Gender::Male, 4.0),
                scored("c", Gender::Male, 7.0),
                scored("d", Gender::Male, 6.0),
            ],
            2,
        );
        // After a/b, team 1 (4.0) is weaker, so c joins it; d then joins team 0.
        assert_eq!(team_ids(&alloc.teams[0]), vec!["a", "d"]);
        assert_eq!(team_ids(&alloc.teams[1]), vec!["b", "c"]);
        assert_eq!(alloc.total_players_playing, 4);
    }

    #[test]
    fn size_balance_beats_score_balance() {
        let alloc = allocate(
            vec![
                scored("star", Gender::Male, 100.0),
                scored("x", Gender::Male, 1.0),
                scored("y", Gender::Male, 1.0),
                scored("z", Gender::Male, 1.0),
            ],
            2,
        );
        // y joins the weaker team, so z must go to the stronger, smaller one.
        assert_eq!(team_ids(&alloc.teams[0]), vec!["star", "z"]);
        assert_eq!(team_ids(&alloc.teams[1]), vec!["x", "y"]);
        assert_eq!(alloc.size_spread(), 0);
    }

    #[test]
    fn three_players_two_teams_never_three_zero() {
        let alloc = allocate(
            vec![
                scored("a", Gender::Male, 5.0),
                scored("b", Gender::Female, 5.0),
                scored("c", Gender::Male, 5.0),
            ],
            2,
        );
        let mut sizes = alloc.team_sizes();
        sizes.sort();
        assert_eq!(sizes, vec![1, 2]);
    }

    #[test]
    fn female_players_split_one_per_team() {
        let ordered = prioritize(vec![
            scored("m70", Gender::Male, 70.0),
            scored("m65", Gender::Male, 65.0),
            scored("f80", Gender::Female, 80.0),
            scored("f30", Gender::Female, 30.0),
        ]);
        let alloc = allocate(ordered, 2);

        assert_eq!(alloc.team_sizes(), vec![2, 2]);
        for team in &alloc.teams {
            assert_eq!(team.gender_count.female, 1);
            assert_eq!(team.gender_count.male, 1);
        }
        // f30's team is weaker and receives the stronger male.
        assert_eq!(team_ids(&alloc.teams[0]), vec!["f80", "m65"]);
        assert_eq!(team_ids(&alloc.teams[1]), vec!["f30", "m70"]);
    }

    #[test]
    fn more_teams_than_players_leaves_empty_teams() {
        let alloc = allocate(vec![scored("a", Gender::Male, 5.0)], 4);
        assert_eq!(alloc.team_sizes(), vec![1, 0, 0, 0]);
        assert_eq!(alloc.size_spread(), 1);
    }

    #[test]
    fn zero_teams_places_nobody() {
        let alloc = allocate(vec![scored("a", Gender::Male, 5.0)], 0);
        assert!(alloc.teams.is_empty());
        assert_eq!(alloc.total_players_playing, 0);
        assert_eq!(alloc.size_spread(), 0);
    }

    #[test]
    fn allocation_serializes_camel_case() {
        let alloc = allocate(vec![scored("a", Gender::Male, 5.0)], 2);
        let json = serde_json::to_value(&alloc).unwrap();
        assert_eq!(json["totalPlayersPlaying"], 1);
        assert_eq!(json["teams"].as_array().unwrap().len(), 2);
    }
}

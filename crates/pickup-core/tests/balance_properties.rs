// Property tests over generated rosters: team count, size spread, and
// conservation of players and gender counts.

use pickup_core::{balance_with, recompute, EngineSettings, Gender, RandomFudge, ValidationError};
use proptest::prelude::*;
use serde_json::{json, Value};

const GENDERS: [&str; 4] = ["male", "female", "nonBinary", "other"];

/// A generated entry plus whether it should survive sanitization.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    gender: Option<Gender>,
    valid: bool,
}

fn entry() -> impl Strategy<Value = Entry> {
    (
        prop::array::uniform6(0i64..=11),
        0usize..GENDERS.len(),
        0u8..5,
        any::<u16>(),
    )
        .prop_map(|(skills, g, playing, id)| {
            let playing_value = match playing {
                0 => json!(true),
                1 => json!("true"),
                2 => json!(1),
                3 => json!(false),
                _ => json!("no"),
            };
            let gender = Gender::from_wire(GENDERS[g]);
            let valid =
                skills.iter().all(|s| (1..=10).contains(s)) && gender.is_some() && playing < 3;
            let value = json!({
                "id": format!("p{id}"),
                "name": format!("Player {id}"),
                "gameKnowledge": skills[0],
                "goalScoring": skills[1],
                "attack": skills[2],
                "midfield": skills[3],
                "defense": skills[4],
                "fitness": skills[5],
                "gender": GENDERS[g],
                "isPlayingThisWeek": playing_value
            });
            Entry { value, gender, valid }
        })
}

proptest! {
    #[test]
    fn balance_invariants_hold(
        entries in prop::collection::vec(entry(), 0..40),
        num_teams in 2i64..8,
        seed in any::<u64>(),
    ) {
        let roster = Value::Array(entries.iter().map(|e| e.value.clone()).collect());
        let expected = entries.iter().filter(|e| e.valid).count();
        let mut fudge = RandomFudge::seeded(0.7, seed);
        let result = balance_with(&roster, Some(num_teams), &EngineSettings::default(), &mut fudge);

        if expected == 0 {
            prop_assert_eq!(result, Err(ValidationError::NoValidPlayers));
            return Ok(());
        }
        let alloc = result.unwrap();

        prop_assert_eq!(alloc.teams.len(), num_teams as usize);
        prop_assert_eq!(alloc.total_players_playing, expected);
        prop_assert_eq!(alloc.team_sizes().iter().sum::<usize>(), expected);
        prop_assert!(alloc.size_spread() <= 1);

        for team in &alloc.teams {
            prop_assert_eq!(team.gender_count.total(), team.len());
            prop_assert_eq!(&recompute(team), team);
        }

        for gender in Gender::ALL {
            let placed: usize = alloc.teams.iter().map(|t| t.gender_count.get(gender)).sum();
            let supplied = entries
                .iter()
                .filter(|e| e.valid && e.gender == Some(gender))
                .count();
            prop_assert_eq!(placed, supplied);
        }
    }

    #[test]
    fn non_male_players_spread_evenly(
        women in 0usize..12,
        men in 0usize..12,
        num_teams in 2i64..6,
        seed in any::<u64>(),
    ) {
        prop_assume!(women + men > 0);
        let roster: Vec<Value> = (0..women + men)
            .map(|i| {
                let gender = if i < women { "female" } else { "male" };
                json!({
                    "id": format!("p{i}"),
                    "gameKnowledge": 1 + i % 10, "goalScoring": 5, "attack": 5,
                    "midfield": 5, "defense": 5, "fitness": 5,
                    "gender": gender,
                    "isPlayingThisWeek": true
                })
            })
            .collect();
        let roster = Value::Array(roster);
        let mut fudge = RandomFudge::seeded(0.7, seed);
        let alloc = balance_with(&roster, Some(num_teams), &EngineSettings::default(), &mut fudge)
            .unwrap();

        let counts: Vec<usize> = alloc.teams.iter().map(|t| t.gender_count.female).collect();
        let max = counts.iter().max().copied().unwrap_or(0);
        let min = counts.iter().min().copied().unwrap_or(0);
        prop_assert!(max - min <= 1, "female counts {:?}", counts);
    }
}

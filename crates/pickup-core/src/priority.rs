// Allocation order: non-male cohort first, each cohort by descending score.

use crate::player::ScoredPlayer;

/// Reorder players for allocation.
///
/// Female and non-binary players come first so the allocator spreads them
/// while every team is still near-empty. Within a cohort, higher composite
/// scores go first; equal scores keep their input order.
pub fn prioritize(players: Vec<ScoredPlayer>) -> Vec<ScoredPlayer> {
    let (mut priority, mut rest): (Vec<_>, Vec<_>) = players
        .into_iter()
        .partition(|p| p.gender().is_priority_cohort());

    sort_by_score_desc(&mut priority);
    sort_by_score_desc(&mut rest);

    priority.extend(rest);
    priority
}

fn sort_by_score_desc(players: &mut [ScoredPlayer]) {
    players.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
}

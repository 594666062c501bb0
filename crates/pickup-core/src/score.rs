// Composite scoring: per-skill weights plus a bounded random fudge.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::player::{Skill, Skills, MAX_SKILL};

/// Default half-width of the fudge interval applied to each skill value.
pub const DEFAULT_FUDGE_RANGE: f64 = 0.7;

/// Largest usable fudge range. A wider interval would swamp every rating.
pub const MAX_FUDGE_RANGE: f64 = MAX_SKILL;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Multipliers applied to each (fudged) skill value.
///
/// The defaults sum to 0.901, not 1.0. They are kept as-is; rescaling them
/// would shift every composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub game_knowledge: f64,
    pub goal_scoring: f64,
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub fitness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            game_knowledge: 0.20,
            goal_scoring: 0.20,
            attack: 0.135,
            midfield: 0.133,
            defense: 0.133,
            fitness: 0.10,
        }
    }
}

impl ScoreWeights {
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

    pub fn sum(&self) -> f64 {
        Skill::ALL.iter().map(|&s| self.get(s)).sum()
    }
}

/// Tunables for one balancing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub weights: ScoreWeights,
    /// Half-width of the uniform fudge interval.
    pub fudge_range: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            weights: ScoreWeights::default(),
            fudge_range: DEFAULT_FUDGE_RANGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Fudge sources
// ---------------------------------------------------------------------------

/// Source of the additive perturbation applied to each skill before
/// weighting. One value is drawn per skill per player.
pub trait Fudge {
    fn perturb(&mut self) -> f64;
}

/// Always returns zero. Scores become the plain weighted sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFudge;

impl Fudge for NoFudge {
    fn perturb(&mut self) -> f64 {
        0.0
    }
}

/// Uniform perturbation over `[-range, +range]` drawn from `R`.
#[derive(Debug, Clone)]
pub struct RandomFudge<R> {
    rng: R,
    dist: Option<Uniform<f64>>,
}

impl<R: Rng> RandomFudge<R> {
    /// A `range` outside `(0, MAX_FUDGE_RANGE]` (NaN included) disables the
    /// perturbation.
    pub fn new(rng: R, range: f64) -> Self {
        let dist = (range > 0.0 && range <= MAX_FUDGE_RANGE)
            .then(|| Uniform::new_inclusive(-range, range));
        RandomFudge { rng, dist }
    }
}

impl RandomFudge<ThreadRng> {
    /// Unseeded, backed by the thread-local generator.
    pub fn thread_local(range: f64) -> Self {
        RandomFudge::new(rand::thread_rng(), range)
    }
}

impl RandomFudge<ChaCha8Rng> {
    /// Reproducible for a given seed.
    pub fn seeded(range: f64, seed: u64) -> Self {
        RandomFudge::new(ChaCha8Rng::seed_from_u64(seed), range)
    }
}

impl<R: Rng> Fudge for RandomFudge<R> {
    fn perturb(&mut self) -> f64 {
        match &self.dist {
            Some(dist) => dist.sample(&mut self.rng),
            None => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Weighted sum of the six fudged skill values. Not rounded.
pub fn score(skills: &Skills, weights: &ScoreWeights, fudge: &mut impl Fudge) -> f64 {
    Skill::ALL
        .iter()
        .map(|&s| (skills.get(s) + fudge.perturb()) * weights.get(s))
        .sum()
}

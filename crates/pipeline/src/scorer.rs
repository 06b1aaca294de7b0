//! Per-candidate scoring.
//!
//! A candidate's score is the sum of independent terms (questionnaire
//! weights, category/cast/crew affinity, era or recency bonus) plus one
//! random tie-breaker. Each term is kept in a [`ScoreBreakdown`] so a
//! recommendation can explain itself.

use crate::config::RecommenderConfig;
use rand::Rng;
use rayon::prelude::*;
use signals::{Candidate, PreferenceProfile};

/// The individual terms that add up to a candidate's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub questionnaire: i64,
    pub category_affinity: i64,
    pub cast_affinity: i64,
    pub crew_affinity: i64,
    pub era_bonus: i64,
    pub recency_bonus: i64,
    pub noise: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.deterministic().saturating_add(self.noise)
    }

    /// Everything except the random term
    pub fn deterministic(&self) -> i64 {
        [
            self.category_affinity,
            self.cast_affinity,
            self.crew_affinity,
            self.era_bonus,
            self.recency_bonus,
        ]
        .into_iter()
        .fold(self.questionnaire, i64::saturating_add)
    }
}

/// A candidate together with its score for this request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: i64,
    pub breakdown: ScoreBreakdown,
}

/// Scores candidates against a preference profile.
///
/// Scoring itself is pure; randomness only enters through the noise value
/// handed to [`Scorer::score`].
#[derive(Debug, Clone)]
pub struct Scorer {
    config: RecommenderConfig,
}

impl Scorer {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Draw one noise value from the configured range.
    pub fn draw_noise<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let range = self.config.noise;
        if range.min >= range.max {
            range.min
        } else {
            rng.random_range(range.min..=range.max)
        }
    }

    /// Score a single candidate with a given noise value.
    pub fn score(
        &self,
        candidate: &Candidate,
        profile: &PreferenceProfile,
        noise: i64,
    ) -> ScoreBreakdown {
        let config = &self.config;
        let mut breakdown = ScoreBreakdown {
            noise,
            ..ScoreBreakdown::default()
        };

        // Scores saturate instead of overflowing on extreme settings
        for category in &candidate.categories {
            if let Some(weight) = profile.category_weights.get_by_name(category) {
                breakdown.questionnaire = breakdown
                    .questionnaire
                    .saturating_add(weight.saturating_mul(config.category_weight_multiplier));
            }
            breakdown.category_affinity = breakdown.category_affinity.saturating_add(points(
                profile.affinity.category_count(category),
                config.category_affinity_points,
            ));
        }

        breakdown.cast_affinity = candidate
            .cast
            .iter()
            .map(|name| points(profile.affinity.cast_count(name), config.cast_affinity_points))
            .fold(0, i64::saturating_add);

        breakdown.crew_affinity = candidate
            .crew
            .iter()
            .map(|name| points(profile.affinity.crew_count(name), config.crew_affinity_points))
            .fold(0, i64::saturating_add);

        let year = candidate.year();
        match profile.era {
            Some(era) => {
                if config.era_bounds.era_for_year(year) == era {
                    breakdown.era_bonus = config.era_bonus;
                }
            }
            None => {
                if year >= config.recency_year {
                    breakdown.recency_bonus = config.recency_bonus;
                }
            }
        }

        breakdown
    }

    /// Score every candidate in parallel, preserving input order.
    ///
    /// Noise is drawn up front, one value per candidate in input order, so a
    /// seeded RNG gives the same scores however rayon schedules the work.
    pub fn score_all<R: Rng + ?Sized>(
        &self,
        candidates: Vec<Candidate>,
        profile: &PreferenceProfile,
        rng: &mut R,
    ) -> Vec<ScoredCandidate> {
        let noise: Vec<i64> = candidates.iter().map(|_| self.draw_noise(rng)).collect();

        candidates
            .into_par_iter()
            .zip(noise.into_par_iter())
            .map(|(candidate, noise)| {
                let breakdown = self.score(&candidate, profile, noise);
                ScoredCandidate {
                    score: breakdown.total(),
                    candidate,
                    breakdown,
                }
            })
            .collect()
    }
}

fn points(count: usize, per_match: i64) -> i64 {
    i64::try_from(count)
        .unwrap_or(i64::MAX)
        .saturating_mul(per_match)
}

//! Ranking and final selection.

use crate::config::RecommenderConfig;
use crate::scorer::ScoredCandidate;
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// Rank scored candidates and pick the final list.
///
/// ## Algorithm
/// 1. Stable sort by score, highest first (ties keep input order)
/// 2. Keep the top `candidate_pool_size`
/// 3. Shuffle only the first `shuffle_window` positions
/// 4. Truncate to `result_size`
pub fn rank_and_select<R: Rng + ?Sized>(
    mut scored: Vec<ScoredCandidate>,
    config: &RecommenderConfig,
    rng: &mut R,
) -> Vec<ScoredCandidate> {
    scored.sort_by_key(|s| Reverse(s.score));
    scored.truncate(config.candidate_pool_size);

    let window = config.shuffle_window.min(scored.len());
    scored[..window].shuffle(rng);

    scored.truncate(config.result_size);
    scored
}

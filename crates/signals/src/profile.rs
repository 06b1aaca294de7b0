//! Signal extraction: raw user signals in, immutable preference profile out.

use crate::affinity::AffinityLists;
use crate::era::extract_era;
use crate::types::{RatingRecord, UserSignals};
use crate::weights::CategoryWeights;
use data_loader::Era;
use tracing::debug;

/// Everything the scorer knows about a user's taste.
///
/// Built once per request by [`extract_profile`] and only read afterwards,
/// so it can be shared across scoring threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceProfile {
    pub category_weights: CategoryWeights,
    pub affinity: AffinityLists,
    pub era: Option<Era>,
    /// Mean of all present ratings. Available to callers, not used in scoring.
    pub average_rating: Option<f32>,
}

impl PreferenceProfile {
    /// The profile of a user with no answers and no history
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Extract a [`PreferenceProfile`] from raw signals.
///
/// Records rated at least `high_rating_threshold` feed the affinity lists.
pub fn extract_profile(signals: &UserSignals, high_rating_threshold: u8) -> PreferenceProfile {
    let profile = PreferenceProfile {
        category_weights: CategoryWeights::from_answers(&signals.answers),
        affinity: AffinityLists::from_ratings(&signals.ratings, high_rating_threshold),
        era: extract_era(&signals.answers),
        average_rating: average_rating(&signals.ratings),
    };
    debug!(
        answers = signals.answers.len(),
        ratings = signals.ratings.len(),
        era = ?profile.era,
        liked_categories = profile.affinity.categories().len(),
        "Extracted preference profile"
    );
    profile
}

fn average_rating(ratings: &[RatingRecord]) -> Option<f32> {
    let present: Vec<f32> = ratings
        .iter()
        .filter_map(|r| r.rating.map(f32::from))
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f32>() / present.len() as f32)
    }
}

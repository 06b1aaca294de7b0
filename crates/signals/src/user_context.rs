//! Helper functions to pull per-user data out of the DataIndex
//!
//! The catalog-backed suppliers use these to hand the engine a user's raw
//! signals and to give the candidate filters a [`UserContext`].

use crate::types::{RatingRecord, UserContext, UserSignals};
use anyhow::{Result, anyhow};
use data_loader::{DataIndex, UserId};
use tracing::warn;

/// Build a UserContext from DataIndex for a given user
///
/// - Films watched (reviewed or not)
/// - Streaming services the user subscribes to
pub fn build_user_context(data_index: &DataIndex, user_id: UserId) -> Result<UserContext> {
    let user = data_index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let mut context = UserContext::new(user_id);
    context.subscribed_services = user.streaming_services.iter().copied().collect();
    context.watched_films = data_index
        .get_user_watched(user_id)
        .iter()
        .map(|w| w.film_id)
        .collect();

    Ok(context)
}

/// Gather the quiz answers and rating history for a user.
pub fn load_user_signals(data_index: &DataIndex, user_id: UserId) -> Result<UserSignals> {
    if data_index.get_user(user_id).is_none() {
        return Err(anyhow!("User {} not found", user_id));
    }

    let answers = data_index.get_user_answers(user_id).to_vec();
    let ratings = data_index
        .get_user_watched(user_id)
        .iter()
        .filter_map(|watched| match data_index.get_film(watched.film_id) {
            Some(film) => Some(RatingRecord::from_film(film, watched.review)),
            None => {
                warn!(
                    "User {} watched unknown film {}, skipping",
                    user_id, watched.film_id
                );
                None
            }
        })
        .collect();

    Ok(UserSignals::new(answers, ratings))
}

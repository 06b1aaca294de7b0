//! Drops films the user has already seen.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Film;
use signals::UserContext;

/// Removes films present in the user's watch history, reviewed or not.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply<'a>(&self, films: Vec<&'a Film>, context: &UserContext) -> Result<Vec<&'a Film>> {
        Ok(films
            .into_iter()
            .filter(|film| !context.watched_films.contains(&film.id))
            .collect())
    }
}

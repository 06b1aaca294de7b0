//! Chains filters into one pass over the catalog.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Film;
use signals::UserContext;
use tracing::debug;

/// Runs a list of filters in the order they were added.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyWatchedFilter)
///     .add_filter(StreamingServiceFilter);
///
/// let eligible = pipeline.apply(films, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the end of the chain (builder pattern)
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply every filter in sequence, stopping at the first error.
    pub fn apply<'a>(&self, films: Vec<&'a Film>, context: &UserContext) -> Result<Vec<&'a Film>> {
        let mut current = films;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context)?;
            debug!(
                "Filter {} kept {} of {} films for user {}",
                filter.name(),
                current.len(),
                before,
                context.user_id
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

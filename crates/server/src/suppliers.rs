//! Where the orchestrator gets its inputs from.
//!
//! The engine never reads storage itself. A [`SignalSupplier`] hands over a
//! user's classified answers and rating history, a [`CandidateSupplier`] the
//! films that user may be recommended. Both are blocking and are run on the
//! tokio blocking pool by the orchestrator.

use std::sync::Arc;

use anyhow::{Context, Result};
use data_loader::{DataIndex, Film, UserId};
use pipeline::FilterPipeline;
use pipeline::filters::{AlreadyWatchedFilter, StreamingServiceFilter};
use signals::user_context::{build_user_context, load_user_signals};
use signals::{Candidate, UserSignals};
use tracing::debug;

/// Supplies the raw preference signals of a user.
pub trait SignalSupplier: Send + Sync {
    fn get_signals(&self, user_id: UserId) -> Result<UserSignals>;
}

/// Supplies the films a user is eligible to be recommended, already filtered.
pub trait CandidateSupplier: Send + Sync {
    fn get_candidates(&self, user_id: UserId) -> Result<Vec<Candidate>>;
}

/// Reads stored quiz answers and watch history out of a [`DataIndex`].
#[derive(Clone)]
pub struct CatalogSignalSupplier {
    data_index: Arc<DataIndex>,
}

impl CatalogSignalSupplier {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self { data_index }
    }
}

impl SignalSupplier for CatalogSignalSupplier {
    fn get_signals(&self, user_id: UserId) -> Result<UserSignals> {
        load_user_signals(&self.data_index, user_id)
            .with_context(|| format!("Failed to load signals for user {}", user_id))
    }
}

/// Runs the catalog through a [`FilterPipeline`] for each request.
///
/// The default pipeline drops watched films and keeps films on one of the
/// user's streaming services.
#[derive(Clone)]
pub struct CatalogCandidateSupplier {
    data_index: Arc<DataIndex>,
    filter_pipeline: Arc<FilterPipeline>,
}

impl CatalogCandidateSupplier {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        let filter_pipeline = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(StreamingServiceFilter);
        Self::with_pipeline(data_index, filter_pipeline)
    }

    /// Use a custom filter pipeline instead of the default one
    pub fn with_pipeline(data_index: Arc<DataIndex>, filter_pipeline: FilterPipeline) -> Self {
        Self {
            data_index,
            filter_pipeline: Arc::new(filter_pipeline),
        }
    }
}

impl CandidateSupplier for CatalogCandidateSupplier {
    fn get_candidates(&self, user_id: UserId) -> Result<Vec<Candidate>> {
        let context = build_user_context(&self.data_index, user_id)
            .with_context(|| format!("Failed to build context for user {}", user_id))?;

        // Film ids come back sorted, which keeps candidate order stable
        let films: Vec<&Film> = self
            .data_index
            .get_all_film_ids()
            .into_iter()
            .filter_map(|id| self.data_index.get_film(id))
            .collect();
        let total = films.len();

        let eligible = self
            .filter_pipeline
            .apply(films, &context)
            .context("Failed to apply candidate filters")?;
        debug!(
            "User {}: {} of {} catalog films are eligible",
            user_id,
            eligible.len(),
            total
        );

        Ok(eligible.into_iter().map(Candidate::from_film).collect())
    }
}

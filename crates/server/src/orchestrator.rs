//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation request:
//! 1. Fetch the user's signals and eligible candidates concurrently
//! 2. Run the engine (profile, score, rank) on the blocking pool
//! 3. Attach titles, years and a short explanation to each pick
//!
//! The engine is CPU-bound and synchronous; everything that could block is
//! moved off the async workers with `spawn_blocking`.

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

use data_loader::{DataIndex, FilmId, UserId};
use pipeline::{Recommender, RecommenderConfig, ScoreBreakdown, ScoredCandidate};
use signals::{Candidate, UserSignals};

use crate::suppliers::{
    CandidateSupplier, CatalogCandidateSupplier, CatalogSignalSupplier, SignalSupplier,
};

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct FilmRecommendation {
    pub film_id: FilmId,
    pub title: String,
    pub year: i32,
    pub categories: Vec<String>,
    pub score: i64,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
}

impl From<ScoredCandidate> for FilmRecommendation {
    fn from(scored: ScoredCandidate) -> Self {
        let explanation = explain(&scored.breakdown);
        let year = scored.candidate.year();
        let Candidate {
            film_id,
            title,
            categories,
            ..
        } = scored.candidate;

        Self {
            film_id,
            title,
            year,
            categories,
            score: scored.score,
            breakdown: scored.breakdown,
            explanation,
        }
    }
}

/// Render the non-zero terms of a breakdown, largest first.
pub fn explain(breakdown: &ScoreBreakdown) -> String {
    let mut parts: Vec<(&str, i64)> = [
        ("questionnaire", breakdown.questionnaire),
        ("liked categories", breakdown.category_affinity),
        ("liked cast", breakdown.cast_affinity),
        ("liked directors", breakdown.crew_affinity),
        ("preferred era", breakdown.era_bonus),
        ("recent release", breakdown.recency_bonus),
    ]
    .into_iter()
    .filter(|(_, points)| *points != 0)
    .collect();
    parts.sort_by_key(|&(_, points)| Reverse(points));

    let mut text: Vec<String> = parts
        .iter()
        .map(|(label, points)| format!("{} {:+}", label, points))
        .collect();
    text.push(format!("noise {:+}", breakdown.noise));
    text.join(", ")
}

/// Main orchestrator that wires the suppliers to the engine
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    signal_supplier: Arc<dyn SignalSupplier>,
    candidate_supplier: Arc<dyn CandidateSupplier>,
    recommender: Arc<Recommender>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over arbitrary suppliers.
    ///
    /// Fails when the config does not validate.
    pub fn new(
        signal_supplier: Arc<dyn SignalSupplier>,
        candidate_supplier: Arc<dyn CandidateSupplier>,
        config: RecommenderConfig,
    ) -> Result<Self> {
        let recommender = Recommender::new(config).context("Invalid recommender config")?;
        Ok(Self {
            signal_supplier,
            candidate_supplier,
            recommender: Arc::new(recommender),
        })
    }

    /// Create an orchestrator backed by the in-memory catalog
    pub fn from_data_index(data_index: Arc<DataIndex>, config: RecommenderConfig) -> Result<Self> {
        Self::new(
            Arc::new(CatalogSignalSupplier::new(data_index.clone())),
            Arc::new(CatalogCandidateSupplier::new(data_index)),
            config,
        )
    }

    pub fn config(&self) -> &RecommenderConfig {
        self.recommender.config()
    }

    /// Main entry point: get recommendations for a user
    ///
    /// Uses the configured seed when there is one, otherwise a fresh OS seed
    /// per request.
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, user_id: UserId) -> Result<Vec<FilmRecommendation>> {
        let rng = match self.config().seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.get_recommendations_with_rng(user_id, rng).await
    }

    /// Same as [`get_recommendations`](Self::get_recommendations) with an explicit RNG
    pub async fn get_recommendations_with_rng(
        &self,
        user_id: UserId,
        mut rng: StdRng,
    ) -> Result<Vec<FilmRecommendation>> {
        let start_time = Instant::now();

        let (signals, candidates) = self.fetch_inputs(user_id).await?;
        info!(
            "Fetched {} answers, {} ratings and {} candidates for user {}",
            signals.answers.len(),
            signals.ratings.len(),
            candidates.len(),
            user_id
        );

        let recommender = self.recommender.clone();
        let picks = tokio::task::spawn_blocking(move || {
            recommender.recommend(&signals, candidates, &mut rng)
        })
        .await
        .context("Recommendation task panicked")?;

        let recommendations: Vec<FilmRecommendation> =
            picks.into_iter().map(FilmRecommendation::from).collect();

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Fetch signals and candidates in parallel
    async fn fetch_inputs(&self, user_id: UserId) -> Result<(UserSignals, Vec<Candidate>)> {
        let (signals_result, candidates_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let supplier = self.signal_supplier.clone();
                move || supplier.get_signals(user_id)
            }),
            tokio::task::spawn_blocking({
                let supplier = self.candidate_supplier.clone();
                move || supplier.get_candidates(user_id)
            })
        );

        let signals = signals_result
            .context("Signal supplier task panicked")?
            .context("Signal supplier failed")?;
        let candidates = candidates_result
            .context("Candidate supplier task panicked")?
            .context("Candidate supplier failed")?;
        Ok((signals, candidates))
    }
}

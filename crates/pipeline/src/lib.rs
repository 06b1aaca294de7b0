//! Scoring and ranking engine for film recommendations.
//!
//! This crate provides:
//! - [`Scorer`]: additive per-candidate score with a [`ScoreBreakdown`]
//! - [`rank_and_select`]: sort, keep the pool, shuffle the head, truncate
//! - [`Recommender`] / [`recommend`]: extract, score and rank in one call
//! - [`Filter`] and [`FilterPipeline`] for narrowing the catalog to candidates
//! - [`RecommenderConfig`] holding every tunable constant
//!
//! ## Architecture
//! 1. Filters remove films the user cannot or should not get (watched, not streamable)
//! 2. Signals are turned into a `PreferenceProfile`
//! 3. Every candidate is scored in parallel
//! 4. The ranker picks the final list using the injected RNG
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{recommend, RecommenderConfig};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = RecommenderConfig::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let picks = recommend(&signals, candidates, &config, &mut rng)?;
//! for pick in picks {
//!     println!("{} ({})", pick.candidate.title, pick.score);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod ranker;
pub mod scorer;
pub mod traits;

pub use config::{ConfigError, EraBounds, MAX_POINTS, NoiseRange, RecommenderConfig};
pub use engine::{Recommender, recommend};
pub use filter_pipeline::FilterPipeline;
pub use ranker::rank_and_select;
pub use scorer::{ScoreBreakdown, ScoredCandidate, Scorer};
pub use traits::Filter;

//! Server crate for the film recommendation engine.
//!
//! Wires signal and candidate suppliers to the synchronous engine from the
//! `pipeline` crate and runs requests on tokio.

pub mod orchestrator;
pub mod suppliers;

pub use orchestrator::{FilmRecommendation, RecommendationOrchestrator, explain};
pub use suppliers::{
    CandidateSupplier, CatalogCandidateSupplier, CatalogSignalSupplier, SignalSupplier,
};

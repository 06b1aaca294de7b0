//! Concrete filters for the [`FilterPipeline`](crate::FilterPipeline).

pub mod already_watched;
pub mod streaming_service;

pub use already_watched::AlreadyWatchedFilter;
pub use streaming_service::StreamingServiceFilter;

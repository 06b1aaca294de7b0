//! # Signals Crate
//!
//! Turns a user's raw preference signals into a [`PreferenceProfile`] the
//! scorer can read.
//!
//! ## Components
//!
//! ### Signal Extractors
//! - **era**: first time-period answer decides the era preference
//! - **weights**: questionnaire rule table, accumulated into [`CategoryWeights`]
//! - **affinity**: categories, cast and crew of highly rated films, as multisets
//! - **profile**: runs all three and bundles the result
//!
//! ### Catalog access
//! - **user_context**: reads answers, history and subscriptions out of the
//!   [`data_loader::DataIndex`]
//!
//! ## Example Usage
//!
//! ```ignore
//! use signals::{extract_profile, user_context::load_user_signals};
//!
//! let raw = load_user_signals(&data_index, user_id)?;
//! let profile = extract_profile(&raw, 4);
//! println!("era: {:?}, top: {:?}", profile.era, profile.category_weights.top(3));
//! ```

pub mod affinity;
pub mod era;
pub mod profile;
pub mod types;
pub mod user_context;
pub mod weights;

pub use affinity::AffinityLists;
pub use era::extract_era;
pub use profile::{PreferenceProfile, extract_profile};
pub use types::{Candidate, RatingRecord, UserContext, UserSignals};
pub use weights::{CategoryWeights, category_deltas};

//! Core trait for candidate filtering.
//!
//! Filters run over borrowed catalog films before they are turned into
//! scoring candidates, so they can look at fields (streaming services,
//! language) the scorer never needs.

use anyhow::Result;
use data_loader::Film;
use signals::UserContext;

/// Removes films that must not be recommended to this user.
///
/// `Send + Sync` so a pipeline can be shared by concurrent requests.
pub trait Filter: Send + Sync {
    /// Name used in debug logs
    fn name(&self) -> &str;

    /// Keep the films that pass. Implementations must preserve input order.
    fn apply<'a>(&self, films: Vec<&'a Film>, context: &UserContext) -> Result<Vec<&'a Film>>;
}

//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while importing and indexing a film catalog.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Catalog file could not be found or opened
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog is not valid JSON or does not match the expected layout
    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// A field could not be interpreted (e.g. a malformed release date)
    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    /// A record points at an entity the catalog does not contain
    #[error("Unknown {entity} id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Two records of the same kind share an id
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    #[error("Invalid catalog: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DataLoadError>;

//! # Data Loader Crate
//!
//! Loads the film catalog (films, streaming services, users, quiz answers
//! and watch history) from a JSON file and indexes it in memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Film, Person, User, WatchedFilm, DataIndex)
//! - **answers**: Quiz answers and their one-time classification
//! - **parser**: Parse catalog JSON into Rust structs
//! - **index**: Build and validate the DataIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_file(Path::new("data/sample_catalog.json"))?;
//!
//! let film = index.get_film(1).unwrap();
//! let history = index.get_user_watched(1);
//! println!("{} ({}), user 1 watched {} films", film.title, film.year(), history.len());
//! ```

pub mod answers;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use answers::{
    DrawsTo, Era, Mood, MovieType, PreferenceAnswer, Question, QuestionKind, QuizAnswer,
    ViewingContext, default_questionnaire,
};
pub use error::{DataLoadError, Result};
pub use types::{
    Category, DataIndex, Film, FilmId, Person, StreamingService, StreamingServiceId, User,
    UserId, WatchedFilm,
};

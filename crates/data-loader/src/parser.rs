//! Parser for catalog files.
//!
//! A catalog is a single JSON document:
//!
//! ```json
//! {
//!   "streaming_services": [{ "id": 8, "name": "Netflix" }],
//!   "films": [{
//!     "id": 1, "title": "Forrest Gump", "release_date": "1994-07-06",
//!     "language": "en", "categories": ["Drama", "Romance"],
//!     "actors": [{ "first_name": "Tom", "last_name": "Hanks" }],
//!     "directors": [{ "first_name": "Robert", "last_name": "Zemeckis" }],
//!     "streaming_services": [8]
//!   }],
//!   "users": [{
//!     "id": 1, "email": "ana@example.com", "streaming_services": [8],
//!     "answers": [{ "question": "What's your mood today?", "answer": "Chill" }],
//!     "watched": [{ "film_id": 1, "review": 5 }]
//!   }]
//! }
//! ```
//!
//! Quiz answers are classified here; this is the only place the keyword
//! tables in [`crate::answers`] are consulted.

use crate::answers::{PreferenceAnswer, QuizAnswer};
use crate::error::{DataLoadError, Result};
use crate::index::check_review;
use crate::types::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    streaming_services: Vec<StreamingService>,
    films: Vec<FilmRecord>,
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct FilmRecord {
    id: FilmId,
    title: String,
    release_date: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    actors: Vec<Person>,
    #[serde(default)]
    directors: Vec<Person>,
    #[serde(default)]
    streaming_services: Vec<StreamingServiceId>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: UserId,
    email: String,
    #[serde(default)]
    streaming_services: Vec<StreamingServiceId>,
    #[serde(default)]
    answers: Vec<PreferenceAnswer>,
    #[serde(default)]
    watched: Vec<WatchedRecord>,
}

#[derive(Debug, Deserialize)]
struct WatchedRecord {
    film_id: FilmId,
    /// Range-checked against the 1-5 scale once parsed
    #[serde(default)]
    review: Option<i64>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Everything read from one catalog file, answers already classified.
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub streaming_services: Vec<StreamingService>,
    pub films: Vec<Film>,
    pub users: Vec<User>,
    /// Classified answers per user, in quiz order
    pub answers: Vec<(UserId, Vec<QuizAnswer>)>,
    pub watched: Vec<WatchedFilm>,
}

fn parse_release_date(film_id: FilmId, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DataLoadError::InvalidValue {
        field: format!("release_date of film {}", film_id),
        value: raw.to_string(),
    })
}

/// Parse a catalog file from disk
pub fn parse_catalog(path: &Path) -> Result<ParsedCatalog> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    parse_catalog_str(&contents)
}

/// Parse a catalog from a JSON string
pub fn parse_catalog_str(json: &str) -> Result<ParsedCatalog> {
    let file: CatalogFile = serde_json::from_str(json)?;

    let films = file
        .films
        .into_iter()
        .map(|record| -> Result<Film> {
            Ok(Film {
                release_date: parse_release_date(record.id, &record.release_date)?,
                id: record.id,
                title: record.title,
                language: record.language,
                categories: record.categories,
                actors: record.actors,
                directors: record.directors,
                streaming_services: record.streaming_services,
            })
        })
        .collect::<Result<Vec<Film>>>()?;

    let mut parsed = ParsedCatalog {
        streaming_services: file.streaming_services,
        films,
        ..ParsedCatalog::default()
    };

    for record in file.users {
        let classified: Vec<QuizAnswer> = record
            .answers
            .iter()
            .map(|raw| {
                let answer = QuizAnswer::classify(raw);
                if answer == QuizAnswer::Unrecognized {
                    debug!(
                        user_id = record.id,
                        question = %raw.question,
                        answer = %raw.answer,
                        "Quiz answer not recognized, it will carry no signal"
                    );
                }
                answer
            })
            .collect();
        parsed.answers.push((record.id, classified));

        for w in &record.watched {
            parsed.watched.push(WatchedFilm {
                user_id: record.id,
                film_id: w.film_id,
                review: w.review.map(check_review).transpose()?,
            });
        }

        parsed.users.push(User {
            id: record.id,
            email: record.email,
            streaming_services: record.streaming_services,
        });
    }

    Ok(parsed)
}

//! Core domain types for the film catalog.
//!
//! Films, people, streaming services and users as they come out of the
//! catalog import. Questionnaire answers live in [`crate::answers`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::answers::QuizAnswer;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a film
pub type FilmId = u32;

/// Unique identifier for a streaming service
pub type StreamingServiceId = u32;

// =============================================================================
// People
// =============================================================================

/// An actor or director credited on a film.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "first last", or just the first name for single-name credits.
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

// =============================================================================
// Films
// =============================================================================

/// A film in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    pub release_date: NaiveDate,
    pub language: String,
    /// Category (genre) names, e.g. "Drama" or "Science Fiction"
    pub categories: Vec<String>,
    pub actors: Vec<Person>,
    pub directors: Vec<Person>,
    /// Services this film can be streamed, rented or bought on
    pub streaming_services: Vec<StreamingServiceId>,
}

impl Film {
    pub fn year(&self) -> i32 {
        self.release_date.year()
    }
}

/// Known film categories.
///
/// This is the TMDb genre vocabulary the catalog is built from. Films may
/// still carry category names outside of it; those only take part in
/// affinity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    ScienceFiction,
    TvMovie,
    Thriller,
    War,
    Western,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Action,
        Category::Adventure,
        Category::Animation,
        Category::Comedy,
        Category::Crime,
        Category::Documentary,
        Category::Drama,
        Category::Family,
        Category::Fantasy,
        Category::History,
        Category::Horror,
        Category::Music,
        Category::Mystery,
        Category::Romance,
        Category::ScienceFiction,
        Category::TvMovie,
        Category::Thriller,
        Category::War,
        Category::Western,
    ];

    /// Catalog name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Animation => "Animation",
            Self::Comedy => "Comedy",
            Self::Crime => "Crime",
            Self::Documentary => "Documentary",
            Self::Drama => "Drama",
            Self::Family => "Family",
            Self::Fantasy => "Fantasy",
            Self::History => "History",
            Self::Horror => "Horror",
            Self::Music => "Music",
            Self::Mystery => "Mystery",
            Self::Romance => "Romance",
            Self::ScienceFiction => "Science Fiction",
            Self::TvMovie => "TV Movie",
            Self::Thriller => "Thriller",
            Self::War => "War",
            Self::Western => "Western",
        }
    }

    /// Look up a category by its exact catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A streaming provider films are available on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingService {
    pub id: StreamingServiceId,
    pub name: String,
}

// =============================================================================
// Users and history
// =============================================================================

/// A user of the picker and the services they subscribe to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub streaming_services: Vec<StreamingServiceId>,
}

/// A film the user has watched, with their optional 1-5 review
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WatchedFilm {
    pub user_id: UserId,
    pub film_id: FilmId,
    pub review: Option<u8>,
}

// =============================================================================
// DataIndex - The In-Memory Catalog
// =============================================================================

/// Holds the catalog and per-user history with O(1) lookups.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) films: HashMap<FilmId, Film>,
    pub(crate) streaming_services: HashMap<StreamingServiceId, StreamingService>,

    /// Classified questionnaire answers per user, in the order they were given
    pub(crate) user_answers: HashMap<UserId, Vec<QuizAnswer>>,
    /// Watch history per user
    pub(crate) user_watched: HashMap<UserId, Vec<WatchedFilm>>,
}

impl DataIndex {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            films: HashMap::new(),
            streaming_services: HashMap::new(),
            user_answers: HashMap::new(),
            user_watched: HashMap::new(),
        }
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_film(&self, id: FilmId) -> Option<&Film> {
        self.films.get(&id)
    }

    pub fn get_streaming_service(&self, id: StreamingServiceId) -> Option<&StreamingService> {
        self.streaming_services.get(&id)
    }

    /// Classified answers for a user; empty if the user took no quiz
    pub fn get_user_answers(&self, user_id: UserId) -> &[QuizAnswer] {
        self.user_answers
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Watch history for a user; empty if none
    pub fn get_user_watched(&self, user_id: UserId) -> &[WatchedFilm] {
        self.user_watched
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All film ids in ascending order
    pub fn get_all_film_ids(&self) -> Vec<FilmId> {
        let mut ids: Vec<FilmId> = self.films.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// All user ids in ascending order
    pub fn get_all_user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.users.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_film(&mut self, film: Film) {
        self.films.insert(film.id, film);
    }

    pub fn insert_streaming_service(&mut self, service: StreamingService) {
        self.streaming_services.insert(service.id, service);
    }

    /// Record a classified answer for a user (appends, order is kept)
    pub fn insert_answer(&mut self, user_id: UserId, answer: QuizAnswer) {
        self.user_answers.entry(user_id).or_default().push(answer);
    }

    pub fn insert_watched(&mut self, watched: WatchedFilm) {
        self.user_watched
            .entry(watched.user_id)
            .or_default()
            .push(watched);
    }

    /// (users, films, watched entries)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_watched = self.user_watched.values().map(|v| v.len()).sum();
        (self.users.len(), self.films.len(), total_watched)
    }
}

impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(Person::new("Tom", "Hanks").full_name(), "Tom Hanks");
        assert_eq!(Person::new("Zendaya", "").full_name(), "Zendaya");
        assert_eq!(
            Person::new("Guillermo", "del Toro").full_name(),
            "Guillermo del Toro"
        );
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("Science Fiction"), Some(Category::ScienceFiction));
        assert_eq!(Category::from_name("drama"), None);
        assert_eq!(Category::from_name("Experimental"), None);
    }

    #[test]
    fn test_film_year() {
        let film = Film {
            id: 1,
            title: "Forrest Gump".to_string(),
            release_date: NaiveDate::from_ymd_opt(1994, 7, 6).unwrap(),
            language: "en".to_string(),
            categories: vec!["Drama".to_string()],
            actors: vec![],
            directors: vec![],
            streaming_services: vec![],
        };
        assert_eq!(film.year(), 1994);
    }
}

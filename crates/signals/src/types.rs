//! Request-scoped inputs to the recommendation engine.

use chrono::{Datelike, NaiveDate};
use data_loader::{Film, FilmId, QuizAnswer, StreamingServiceId, UserId};
use std::collections::HashSet;

/// One entry of a user's rating history, flattened for signal extraction.
///
/// Cast and crew are full names ("first last").
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub film_id: FilmId,
    /// 1-5, or `None` when the user watched without reviewing
    pub rating: Option<u8>,
    pub categories: Vec<String>,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
}

impl RatingRecord {
    pub fn from_film(film: &Film, rating: Option<u8>) -> Self {
        Self {
            film_id: film.id,
            rating,
            categories: film.categories.clone(),
            cast: film.actors.iter().map(|p| p.full_name()).collect(),
            crew: film.directors.iter().map(|p| p.full_name()).collect(),
        }
    }
}

/// A film eligible for recommendation in the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub film_id: FilmId,
    pub title: String,
    pub categories: Vec<String>,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
    pub release_date: NaiveDate,
}

impl Candidate {
    pub fn from_film(film: &Film) -> Self {
        Self {
            film_id: film.id,
            title: film.title.clone(),
            categories: film.categories.clone(),
            cast: film.actors.iter().map(|p| p.full_name()).collect(),
            crew: film.directors.iter().map(|p| p.full_name()).collect(),
            release_date: film.release_date,
        }
    }

    pub fn year(&self) -> i32 {
        self.release_date.year()
    }
}

/// Raw preference signals for one user, as handed over by a signal supplier.
#[derive(Debug, Clone, Default)]
pub struct UserSignals {
    /// Classified quiz answers in the order they were given
    pub answers: Vec<QuizAnswer>,
    pub ratings: Vec<RatingRecord>,
}

impl UserSignals {
    pub fn new(answers: Vec<QuizAnswer>, ratings: Vec<RatingRecord>) -> Self {
        Self { answers, ratings }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.ratings.is_empty()
    }
}

/// What the candidate filters need to know about the requesting user.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: UserId,
    pub watched_films: HashSet<FilmId>,
    pub subscribed_services: HashSet<StreamingServiceId>,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            watched_films: HashSet::new(),
            subscribed_services: HashSet::new(),
        }
    }
}

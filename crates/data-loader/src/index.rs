//! DataIndex building and validation.
//!
//! Turns a [`ParsedCatalog`] into a [`DataIndex`], rejecting catalogs with
//! duplicate ids, dangling references or out-of-range reviews.

use crate::error::{DataLoadError, Result};
use crate::parser::{self, ParsedCatalog};
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Reviews are on a 1-5 scale
pub const MIN_REVIEW: u8 = 1;
pub const MAX_REVIEW: u8 = 5;

impl DataIndex {
    /// Load and validate a catalog file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading film catalog from {:?}", path);
        let parsed = parser::parse_catalog(path)?;
        let index = Self::from_catalog(parsed)?;

        let (users, films, watched) = index.counts();
        info!(
            "Loaded {} users, {} films, {} watched entries",
            users, films, watched
        );
        Ok(index)
    }

    /// Build an index from an already parsed catalog.
    ///
    /// Steps:
    /// 1. Insert streaming services, films and users, rejecting duplicate ids
    /// 2. Attach classified answers and watch history
    /// 3. Validate cross references
    pub fn from_catalog(catalog: ParsedCatalog) -> Result<Self> {
        let mut index = DataIndex::new();

        for service in catalog.streaming_services {
            if index.streaming_services.contains_key(&service.id) {
                return Err(duplicate("StreamingService", service.id));
            }
            index.insert_streaming_service(service);
        }

        for film in catalog.films {
            if index.films.contains_key(&film.id) {
                return Err(duplicate("Film", film.id));
            }
            index.insert_film(film);
        }

        for user in catalog.users {
            if index.users.contains_key(&user.id) {
                return Err(duplicate("User", user.id));
            }
            index.insert_user(user);
        }

        for (user_id, answers) in catalog.answers {
            for answer in answers {
                index.insert_answer(user_id, answer);
            }
        }

        for watched in catalog.watched {
            index.insert_watched(watched);
        }

        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every film's streaming services exist
    /// - every user's subscriptions exist
    /// - every watched entry points at a known user and film, once per pair
    /// - reviews are in 1..=5
    pub fn validate(&self) -> Result<()> {
        for film in self.films.values() {
            for service_id in &film.streaming_services {
                if !self.streaming_services.contains_key(service_id) {
                    return Err(missing("StreamingService", *service_id));
                }
            }
        }

        for user in self.users.values() {
            for service_id in &user.streaming_services {
                if !self.streaming_services.contains_key(service_id) {
                    return Err(missing("StreamingService", *service_id));
                }
            }
        }

        for user_id in self.user_answers.keys() {
            if !self.users.contains_key(user_id) {
                return Err(missing("User", *user_id));
            }
        }

        for (user_id, watched) in &self.user_watched {
            if !self.users.contains_key(user_id) {
                return Err(missing("User", *user_id));
            }
            let mut seen = HashSet::new();
            for entry in watched {
                if !self.films.contains_key(&entry.film_id) {
                    return Err(missing("Film", entry.film_id));
                }
                if !seen.insert(entry.film_id) {
                    return Err(DataLoadError::ValidationError(format!(
                        "user {} watched film {} more than once",
                        user_id, entry.film_id
                    )));
                }
                if let Some(review) = entry.review {
                    check_review(i64::from(review))?;
                }
            }
        }
        Ok(())
    }
}

/// Accept a review on the 1-5 scale, whatever integer it was stored as.
pub(crate) fn check_review(review: i64) -> Result<u8> {
    u8::try_from(review)
        .ok()
        .filter(|r| (MIN_REVIEW..=MAX_REVIEW).contains(r))
        .ok_or_else(|| DataLoadError::InvalidValue {
            field: "review".to_string(),
            value: review.to_string(),
        })
}

fn duplicate(entity: &str, id: u32) -> DataLoadError {
    DataLoadError::DuplicateId {
        entity: entity.to_string(),
        id,
    }
}

fn missing(entity: &str, id: u32) -> DataLoadError {
    DataLoadError::MissingReference {
        entity: entity.to_string(),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_catalog_str;

    fn catalog(users_json: &str) -> String {
        format!(
            r#"{{
                "streaming_services": [{{ "id": 8, "name": "Netflix" }}],
                "films": [
                    {{ "id": 1, "title": "A", "release_date": "1994-07-06", "streaming_services": [8] }},
                    {{ "id": 2, "title": "B", "release_date": "2021-01-01" }}
                ],
                "users": {}
            }}"#,
            users_json
        )
    }

    fn build(users_json: &str) -> Result<DataIndex> {
        DataIndex::from_catalog(parse_catalog_str(&catalog(users_json))?)
    }

    #[test]
    fn test_from_catalog() {
        let index = build(
            r#"[{ "id": 1, "email": "a@b.c", "streaming_services": [8],
                  "watched": [{ "film_id": 1, "review": 4 }, { "film_id": 2 }] }]"#,
        )
        .unwrap();

        assert_eq!(index.counts(), (1, 2, 2));
        assert_eq!(index.get_all_film_ids(), vec![1, 2]);
        assert_eq!(index.get_user_watched(1).len(), 2);
        assert!(index.get_user_answers(1).is_empty());
        assert_eq!(index.get_streaming_service(8).unwrap().name, "Netflix");
    }

    #[test]
    fn test_unknown_film_in_history() {
        let err = build(r#"[{ "id": 1, "email": "a@b.c", "watched": [{ "film_id": 99 }] }]"#)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::MissingReference { id: 99, .. }));
    }

    #[test]
    fn test_unknown_subscription() {
        let err = build(r#"[{ "id": 1, "email": "a@b.c", "streaming_services": [337] }]"#)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::MissingReference { id: 337, .. }));
    }

    #[test]
    fn test_review_out_of_range() {
        let err = build(
            r#"[{ "id": 1, "email": "a@b.c", "watched": [{ "film_id": 1, "review": 9 }] }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_reviews_outside_u8_get_the_same_error() {
        for review in ["-1", "0", "6", "300"] {
            let users = format!(
                r#"[{{ "id": 1, "email": "a@b.c", "watched": [{{ "film_id": 1, "review": {} }}] }}]"#,
                review
            );
            let err = build(&users).unwrap_err();
            match err {
                DataLoadError::InvalidValue { field, value } => {
                    assert_eq!(field, "review");
                    assert_eq!(value, review);
                }
                other => panic!("unexpected error for review {}: {:?}", review, other),
            }
        }
    }

    #[test]
    fn test_review_bounds_are_inclusive() {
        assert_eq!(check_review(1).unwrap(), 1);
        assert_eq!(check_review(5).unwrap(), 5);
        assert!(check_review(0).is_err());
        assert!(check_review(i64::MAX).is_err());
    }

    #[test]
    fn test_duplicate_user() {
        let err = build(r#"[{ "id": 1, "email": "a@b.c" }, { "id": 1, "email": "d@e.f" }]"#)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn test_film_watched_twice() {
        let err = build(
            r#"[{ "id": 1, "email": "a@b.c", "watched": [{ "film_id": 1 }, { "film_id": 1 }] }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }
}

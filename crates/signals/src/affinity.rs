//! Affinity lists built from highly rated history.
//!
//! Every highly rated film contributes all of its categories, cast and crew.
//! Repeats are kept: a category seen in five liked films counts five times.

use crate::types::RatingRecord;
use std::collections::HashMap;

/// Multisets of categories and people drawn from a user's liked films.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffinityLists {
    categories: Vec<String>,
    cast: Vec<String>,
    crew: Vec<String>,

    category_counts: HashMap<String, usize>,
    cast_counts: HashMap<String, usize>,
    crew_counts: HashMap<String, usize>,
}

fn tally(items: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

impl AffinityLists {
    pub fn new(categories: Vec<String>, cast: Vec<String>, crew: Vec<String>) -> Self {
        Self {
            category_counts: tally(&categories),
            cast_counts: tally(&cast),
            crew_counts: tally(&crew),
            categories,
            cast,
            crew,
        }
    }

    /// Collect affinities from every record rated at least `high_rating_threshold`.
    /// Unrated records never count.
    pub fn from_ratings(ratings: &[RatingRecord], high_rating_threshold: u8) -> Self {
        let mut categories = Vec::new();
        let mut cast = Vec::new();
        let mut crew = Vec::new();

        for record in ratings
            .iter()
            .filter(|r| r.rating.is_some_and(|rating| rating >= high_rating_threshold))
        {
            categories.extend(record.categories.iter().cloned());
            cast.extend(record.cast.iter().cloned());
            crew.extend(record.crew.iter().cloned());
        }

        Self::new(categories, cast, crew)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn cast(&self) -> &[String] {
        &self.cast
    }

    pub fn crew(&self) -> &[String] {
        &self.crew
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    pub fn cast_count(&self, name: &str) -> usize {
        self.cast_counts.get(name).copied().unwrap_or(0)
    }

    pub fn crew_count(&self, name: &str) -> usize {
        self.crew_counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.cast.is_empty() && self.crew.is_empty()
    }

    /// Most frequent categories, ties broken by name
    pub fn top_categories(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(&self.category_counts, n)
    }

    pub fn top_cast(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(&self.cast_counts, n)
    }

    pub fn top_crew(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(&self.crew_counts, n)
    }
}

fn top_n(counts: &HashMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}

//! Questionnaire rule table and the category weights it produces.
//!
//! Each recognized answer nudges one to three categories by a fixed,
//! hand-tuned amount. Contributions accumulate across answers.

use data_loader::{Category, DrawsTo, Mood, MovieType, QuizAnswer, ViewingContext};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use Category::*;

/// Category deltas contributed by one answer.
pub fn category_deltas(answer: &QuizAnswer) -> &'static [(Category, i64)] {
    match answer {
        QuizAnswer::Mood(mood) => match mood {
            Mood::Energetic => &[(Action, 3), (Adventure, 2), (Thriller, 1)],
            Mood::Bored => &[(Comedy, 2), (Adventure, 2), (Mystery, 1)],
            Mood::Chill => &[(Comedy, 2), (Romance, 1), (Animation, 1)],
            Mood::Jittery => &[(Horror, 3), (Thriller, 2)],
        },
        QuizAnswer::MovieType(kind) => match kind {
            MovieType::ActionPacked => &[(Action, 3), (Adventure, 2)],
            MovieType::Emotional => &[(Drama, 3), (Romance, 2)],
            MovieType::MindBending => &[(ScienceFiction, 3), (Mystery, 2), (Thriller, 1)],
            MovieType::LightHearted => &[(Comedy, 3), (Family, 2), (Animation, 1)],
        },
        QuizAnswer::ViewingContext(context) => match context {
            ViewingContext::Alone => &[(Drama, 2), (Documentary, 2), (Mystery, 1)],
            ViewingContext::WithFriends => &[(Comedy, 2), (Action, 1), (Horror, 1)],
            ViewingContext::DateNight => &[(Romance, 3), (Comedy, 1), (Drama, 1)],
            ViewingContext::FamilyTime => &[(Family, 3), (Animation, 2), (Adventure, 1)],
        },
        QuizAnswer::DrawsTo(draw) => match draw {
            DrawsTo::Visuals => &[(ScienceFiction, 2), (Fantasy, 2), (Animation, 1)],
            DrawsTo::Storyline => &[(Drama, 2), (Mystery, 1), (Crime, 1)],
            DrawsTo::Actors => &[(Drama, 1), (Comedy, 1)],
            DrawsTo::Director => &[(Drama, 1), (Crime, 1)],
        },
        // The era answer feeds the era bonus, not category weights
        QuizAnswer::TimePeriod(_) | QuizAnswer::Unrecognized => &[],
    }
}

/// Accumulated questionnaire weight per known category.
///
/// Every known category is present, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWeights {
    weights: BTreeMap<Category, i64>,
}

impl CategoryWeights {
    /// All categories at zero
    pub fn zeroed() -> Self {
        Self {
            weights: Category::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }

    pub fn from_answers(answers: &[QuizAnswer]) -> Self {
        let mut weights = Self::zeroed().weights;
        for answer in answers {
            for &(category, delta) in category_deltas(answer) {
                *weights.entry(category).or_insert(0) += delta;
            }
        }
        Self { weights }
    }

    pub fn get(&self, category: Category) -> i64 {
        self.weights.get(&category).copied().unwrap_or(0)
    }

    /// Weight for a catalog category name; `None` if the name is not a
    /// known category.
    pub fn get_by_name(&self, name: &str) -> Option<i64> {
        Category::from_name(name).map(|c| self.get(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        self.weights.iter().map(|(&c, &w)| (c, w))
    }

    /// Categories with a non-zero weight, highest first
    pub fn top(&self, n: usize) -> Vec<(Category, i64)> {
        let mut ranked: Vec<(Category, i64)> = self.iter().filter(|&(_, w)| w != 0).collect();
        ranked.sort_by_key(|&(_, w)| Reverse(w));
        ranked.truncate(n);
        ranked
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::zeroed()
    }
}

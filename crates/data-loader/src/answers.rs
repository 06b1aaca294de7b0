//! Questionnaire answers.
//!
//! Users answer a short free-text quiz. The text is classified exactly once,
//! when the catalog is imported, into a [`QuizAnswer`]; everything downstream
//! works on the tagged variants and never looks at the raw text again.
//!
//! Classification is keyword based and case-insensitive. Anything that does
//! not match becomes [`QuizAnswer::Unrecognized`] rather than an error.

use serde::{Deserialize, Serialize};

/// A raw (question, answer) pair as stored by the quiz front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceAnswer {
    pub question: String,
    pub answer: String,
}

impl PreferenceAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Which quiz question an answer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    Mood,
    MovieType,
    TimePeriod,
    ViewingContext,
    DrawsTo,
    /// Questions that carry no scoring signal (e.g. preferred length)
    Other,
}

/// Release-era buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    Classic,
    Retro,
    Modern,
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Energetic,
    Bored,
    Chill,
    Jittery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovieType {
    ActionPacked,
    Emotional,
    MindBending,
    LightHearted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewingContext {
    Alone,
    WithFriends,
    DateNight,
    FamilyTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawsTo {
    Visuals,
    Storyline,
    Actors,
    Director,
}

/// A classified quiz answer.
///
/// `TimePeriod` keeps an `Option` because the era question decides the era
/// preference even when its answer text matches no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizAnswer {
    Mood(Mood),
    MovieType(MovieType),
    TimePeriod(Option<Era>),
    ViewingContext(ViewingContext),
    DrawsTo(DrawsTo),
    Unrecognized,
}

impl QuestionKind {
    /// Classify question text.
    ///
    /// Checked in order: time period, mood, viewing context, draws, type.
    /// "How do you prefer to watch movies?" must not fall into the type bucket.
    pub fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        if q.contains("time period") {
            Self::TimePeriod
        } else if q.contains("mood") {
            Self::Mood
        } else if q.contains("watch") {
            Self::ViewingContext
        } else if q.contains("draw") {
            Self::DrawsTo
        } else if q.contains("type") {
            Self::MovieType
        } else {
            Self::Other
        }
    }
}

/// First keyword (in table order) contained in `text` wins.
fn match_keyword<T: Copy>(text: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|&(_, value)| value)
}

const ERA_KEYWORDS: [(&str, Era); 4] = [
    ("classic", Era::Classic),
    ("retro", Era::Retro),
    ("modern", Era::Modern),
    ("recent", Era::Recent),
];

const MOOD_KEYWORDS: [(&str, Mood); 4] = [
    ("energetic", Mood::Energetic),
    ("bored", Mood::Bored),
    ("chill", Mood::Chill),
    ("jittery", Mood::Jittery),
];

const MOVIE_TYPE_KEYWORDS: [(&str, MovieType); 4] = [
    ("action", MovieType::ActionPacked),
    ("emotional", MovieType::Emotional),
    ("mind", MovieType::MindBending),
    ("light", MovieType::LightHearted),
];

const VIEWING_CONTEXT_KEYWORDS: [(&str, ViewingContext); 4] = [
    ("alone", ViewingContext::Alone),
    ("friends", ViewingContext::WithFriends),
    ("date", ViewingContext::DateNight),
    ("family", ViewingContext::FamilyTime),
];

const DRAWS_TO_KEYWORDS: [(&str, DrawsTo); 4] = [
    ("visual", DrawsTo::Visuals),
    ("story", DrawsTo::Storyline),
    ("actor", DrawsTo::Actors),
    ("director", DrawsTo::Director),
];

impl QuizAnswer {
    /// Classify a raw answer. Never fails.
    pub fn classify(raw: &PreferenceAnswer) -> Self {
        let answer = raw.answer.to_lowercase();
        let classified = match QuestionKind::classify(&raw.question) {
            QuestionKind::TimePeriod => Some(Self::TimePeriod(match_keyword(&answer, &ERA_KEYWORDS))),
            QuestionKind::Mood => match_keyword(&answer, &MOOD_KEYWORDS).map(Self::Mood),
            QuestionKind::MovieType => {
                match_keyword(&answer, &MOVIE_TYPE_KEYWORDS).map(Self::MovieType)
            }
            QuestionKind::ViewingContext => {
                match_keyword(&answer, &VIEWING_CONTEXT_KEYWORDS).map(Self::ViewingContext)
            }
            QuestionKind::DrawsTo => match_keyword(&answer, &DRAWS_TO_KEYWORDS).map(Self::DrawsTo),
            QuestionKind::Other => None,
        };
        classified.unwrap_or(Self::Unrecognized)
    }
}

/// A quiz question and the answers offered for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub available_answers: Vec<String>,
}

/// The questionnaire shown to new users.
pub fn default_questionnaire() -> Vec<Question> {
    let q = |question: &str, answers: &[&str]| Question {
        question: question.to_string(),
        available_answers: answers.iter().map(|a| a.to_string()).collect(),
    };
    vec![
        q(
            "What's your mood today?",
            &["Energetic", "Bored", "Chill", "Jittery"],
        ),
        q(
            "What type of movie do you prefer?",
            &["Action-packed", "Emotional", "Mind-bending", "Light-hearted"],
        ),
        q(
            "What's your favorite time period for movies?",
            &[
                "Classic (before 1980)",
                "Retro (1980-2000)",
                "Modern (2000-2015)",
                "Recent (2015+)",
            ],
        ),
        q(
            "How do you prefer to watch movies?",
            &[
                "Alone for focus",
                "With friends for fun",
                "Date night romance",
                "Family time",
            ],
        ),
        q(
            "What movie length do you prefer?",
            &[
                "Short and sweet (under 90 min)",
                "Standard length (90-120 min)",
                "Epic length (over 2 hours)",
                "No preference",
            ],
        ),
        q(
            "What draws you to a movie most?",
            &[
                "Amazing visuals",
                "Great storyline",
                "Favorite actors",
                "Director's reputation",
            ],
        ),
    ]
}

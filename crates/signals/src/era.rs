//! Era preference extraction.

use data_loader::{Era, QuizAnswer};

/// The era preference from the first time-period answer.
///
/// Only the first such answer counts, even when it names no era.
pub fn extract_era(answers: &[QuizAnswer]) -> Option<Era> {
    answers
        .iter()
        .find_map(|answer| match answer {
            QuizAnswer::TimePeriod(era) => Some(*era),
            _ => None,
        })
        .flatten()
}

//! The recommendation engine: extract, score, rank.
//!
//! Everything here is synchronous and side-effect free apart from the
//! injected random source. Callers that need async wrap a run in
//! `spawn_blocking`.

use crate::config::{RecommenderConfig, Result};
use crate::ranker::rank_and_select;
use crate::scorer::{ScoredCandidate, Scorer};
use rand::Rng;
use signals::{Candidate, PreferenceProfile, UserSignals, extract_profile};
use tracing::{debug, instrument};

/// A validated config bound to a scorer.
///
/// ## Example
/// ```ignore
/// let recommender = Recommender::new(RecommenderConfig::default())?;
/// let mut rng = StdRng::seed_from_u64(42);
/// let picks = recommender.recommend(&signals, candidates, &mut rng);
/// ```
#[derive(Debug, Clone)]
pub struct Recommender {
    scorer: Scorer,
}

impl Recommender {
    /// Fails if the config cannot be honored (see [`RecommenderConfig::validate`]).
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: Scorer::new(config),
        })
    }

    pub fn config(&self) -> &RecommenderConfig {
        self.scorer.config()
    }

    /// Extract a profile from raw signals using the configured like threshold.
    pub fn profile(&self, signals: &UserSignals) -> PreferenceProfile {
        extract_profile(signals, self.config().high_rating_threshold)
    }

    /// Recommend from raw user signals.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        signals: &UserSignals,
        candidates: Vec<Candidate>,
        rng: &mut R,
    ) -> Vec<ScoredCandidate> {
        let profile = self.profile(signals);
        self.recommend_for_profile(&profile, candidates, rng)
    }

    /// Recommend from an already extracted profile.
    pub fn recommend_for_profile<R: Rng + ?Sized>(
        &self,
        profile: &PreferenceProfile,
        candidates: Vec<Candidate>,
        rng: &mut R,
    ) -> Vec<ScoredCandidate> {
        if candidates.is_empty() {
            debug!("No candidates, nothing to rank");
            return Vec::new();
        }

        let scored = self.scorer.score_all(candidates, profile, rng);
        let selected = rank_and_select(scored, self.config(), rng);

        debug!(
            "Selected {} films, top score {:?}",
            selected.len(),
            selected.iter().map(|s| s.score).max()
        );
        selected
    }
}

/// One-shot form of [`Recommender::recommend`].
pub fn recommend<R: Rng + ?Sized>(
    signals: &UserSignals,
    candidates: Vec<Candidate>,
    config: &RecommenderConfig,
    rng: &mut R,
) -> Result<Vec<ScoredCandidate>> {
    let recommender = Recommender::new(config.clone())?;
    Ok(recommender.recommend(signals, candidates, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use data_loader::{Era, MovieType, QuizAnswer};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use signals::RatingRecord;
    use std::collections::HashSet;

    fn candidate(film_id: u32, year: i32, categories: &[&str]) -> Candidate {
        Candidate {
            film_id,
            title: format!("Film {}", film_id),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            cast: vec![],
            crew: vec![],
            release_date: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
        }
    }

    fn liked(categories: &[&str]) -> RatingRecord {
        RatingRecord {
            film_id: 0,
            rating: Some(5),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            cast: vec![],
            crew: vec![],
        }
    }

    fn ids(list: &[ScoredCandidate]) -> HashSet<u32> {
        list.iter().map(|s| s.candidate.film_id).collect()
    }

    #[test]
    fn test_small_candidate_sets_are_returned_whole() {
        let config = RecommenderConfig::default();
        for size in 0..=5u32 {
            let candidates: Vec<Candidate> =
                (0..size).map(|i| candidate(i, 2010, &["Drama"])).collect();
            let result = recommend(
                &UserSignals::default(),
                candidates,
                &config,
                &mut StdRng::seed_from_u64(9),
            )
            .unwrap();

            assert_eq!(result.len(), size as usize);
            assert_eq!(ids(&result), (0..size).collect());
        }
    }

    #[test]
    fn test_empty_candidates() {
        let result = recommend(
            &UserSignals::default(),
            vec![],
            &RecommenderConfig::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_signals_score_noise_and_recency_only() {
        let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
        let result = recommender.recommend(
            &UserSignals::default(),
            vec![candidate(1, 2021, &["Drama"]), candidate(2, 2010, &["Comedy"])],
            &mut StdRng::seed_from_u64(5),
        );

        for scored in &result {
            let expected = if scored.candidate.film_id == 1 { 5 } else { 0 };
            assert_eq!(scored.breakdown.deterministic(), expected);
            assert!((1..=10).contains(&scored.breakdown.noise));
        }
    }

    #[test]
    fn test_deterministic_without_noise_or_shuffle() {
        let config = RecommenderConfig::default()
            .with_noise(0, 0)
            .with_shuffle_window(0);
        let signals = UserSignals::new(vec![], vec![liked(&["Drama", "Drama"]), liked(&["Comedy"])]);
        let candidates = vec![
            candidate(1, 2010, &["Comedy"]),
            candidate(2, 2010, &["Drama"]),
            candidate(3, 2010, &["Horror"]),
        ];

        let first = recommend(&signals, candidates.clone(), &config, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let second = recommend(&signals, candidates, &config, &mut StdRng::seed_from_u64(99))
            .unwrap();

        let order: Vec<u32> = first.iter().map(|s| s.candidate.film_id).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(first, second);
        assert_eq!(first[0].score, 30);
        assert_eq!(first[1].score, 15);
    }

    #[test]
    fn test_randomized_runs_stay_in_top_tier() {
        // 10 strong films (Drama liked 3 times -> 45 points) and 30 weak ones.
        // Noise spans at most 9 points, so the strong tier always wins the sort.
        let signals = UserSignals::new(
            vec![],
            vec![liked(&["Drama"]), liked(&["Drama"]), liked(&["Drama"])],
        );
        let mut candidates: Vec<Candidate> =
            (0..30).map(|i| candidate(i, 2010, &["Western"])).collect();
        candidates.extend((100..110).map(|i| candidate(i, 2010, &["Drama"])));
        let strong: HashSet<u32> = (100..110).collect();

        let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
        for seed in 0..30 {
            let picks = recommender.recommend(
                &signals,
                candidates.clone(),
                &mut StdRng::seed_from_u64(seed),
            );
            assert_eq!(picks.len(), 5);
            assert!(ids(&picks).is_subset(&strong));
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
        let candidates: Vec<Candidate> = (0..60)
            .map(|i| candidate(i, 1970 + (i as i32 % 50), &["Drama", "Comedy"]))
            .collect();
        let signals = UserSignals::new(vec![QuizAnswer::TimePeriod(Some(Era::Retro))], vec![]);

        let a = recommender.recommend(&signals, candidates.clone(), &mut StdRng::seed_from_u64(17));
        let b = recommender.recommend(&signals, candidates, &mut StdRng::seed_from_u64(17));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrecognized_answer_changes_nothing() {
        let config = RecommenderConfig::default()
            .with_noise(0, 0)
            .with_shuffle_window(0);
        let base = vec![QuizAnswer::TimePeriod(Some(Era::Modern))];
        let mut with_noise_answer = base.clone();
        with_noise_answer.push(QuizAnswer::Unrecognized);

        let candidates = vec![
            candidate(1, 2005, &["Drama"]),
            candidate(2, 1990, &["Action"]),
            candidate(3, 2022, &["Comedy"]),
        ];

        let plain = recommend(
            &UserSignals::new(base, vec![]),
            candidates.clone(),
            &config,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let extra = recommend(
            &UserSignals::new(with_noise_answer, vec![]),
            candidates,
            &config,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert_eq!(plain, extra);
    }

    #[test]
    fn test_overflowing_multiplier_is_rejected_before_scoring() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{ "category_weight_multiplier": 9223372036854775807 }"#)
                .unwrap();
        let signals = UserSignals::new(vec![QuizAnswer::MovieType(MovieType::Emotional)], vec![]);

        let result = recommend(
            &signals,
            vec![candidate(1, 2010, &["Drama"])],
            &config,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RecommenderConfig::default().with_noise(10, 1);
        assert!(Recommender::new(config.clone()).is_err());
        assert!(
            recommend(
                &UserSignals::default(),
                vec![],
                &config,
                &mut StdRng::seed_from_u64(1)
            )
            .is_err()
        );
    }
}

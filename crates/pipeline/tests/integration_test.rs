//! Integration tests for the pipeline.
//!
//! Builds a small catalog, narrows it with the filter pipeline and runs the
//! engine over the result, the same path the catalog suppliers take.

use chrono::NaiveDate;
use data_loader::{DataIndex, Era, Film, MovieType, Person, QuizAnswer, User, WatchedFilm};
use pipeline::filters::*;
use pipeline::{FilterPipeline, Recommender, RecommenderConfig, recommend};
use rand::SeedableRng;
use rand::rngs::StdRng;
use signals::Candidate;
use signals::user_context::{build_user_context, load_user_signals};

fn film(id: u32, title: &str, year: i32, categories: &[&str], director: &str, services: &[u32]) -> Film {
    let (first, last) = director.split_once(' ').unwrap_or((director, ""));
    Film {
        id,
        title: title.to_string(),
        release_date: NaiveDate::from_ymd_opt(year, 5, 1).unwrap(),
        language: "en".to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        actors: vec![],
        directors: vec![Person::new(first, last)],
        streaming_services: services.to_vec(),
    }
}

fn create_test_index() -> DataIndex {
    let mut index = DataIndex::new();

    index.insert_user(User {
        id: 1,
        email: "sam@example.com".to_string(),
        streaming_services: vec![8],
    });

    index.insert_film(film(1, "Alien", 1979, &["Horror", "Science Fiction"], "Ridley Scott", &[8]));
    index.insert_film(film(2, "Blade Runner", 1982, &["Science Fiction", "Drama"], "Ridley Scott", &[8]));
    index.insert_film(film(3, "Gladiator", 2000, &["Action", "Drama"], "Ridley Scott", &[8]));
    index.insert_film(film(4, "Paddington", 2014, &["Family", "Comedy"], "Paul King", &[8]));
    index.insert_film(film(5, "Arrival", 2016, &["Science Fiction", "Drama"], "Denis Villeneuve", &[9]));
    index.insert_film(film(6, "The Martian", 2015, &["Science Fiction", "Adventure"], "Ridley Scott", &[8, 9]));

    index.insert_watched(WatchedFilm { user_id: 1, film_id: 1, review: Some(5) });
    index.insert_answer(1, QuizAnswer::MovieType(MovieType::MindBending));
    index.insert_answer(1, QuizAnswer::TimePeriod(Some(Era::Recent)));

    index
}

fn candidates_for(index: &DataIndex, user_id: u32) -> Vec<Candidate> {
    let context = build_user_context(index, user_id).unwrap();
    let pipeline = FilterPipeline::new()
        .add_filter(AlreadyWatchedFilter)
        .add_filter(StreamingServiceFilter);

    let mut films: Vec<&Film> = index
        .get_all_film_ids()
        .into_iter()
        .filter_map(|id| index.get_film(id))
        .collect();
    films.sort_by_key(|f| f.id);

    pipeline
        .apply(films, &context)
        .unwrap()
        .into_iter()
        .map(Candidate::from_film)
        .collect()
}

#[test]
fn test_filters_then_engine() {
    let index = create_test_index();
    let candidates = candidates_for(&index, 1);

    // Alien is watched, Arrival is not on service 8
    let ids: Vec<u32> = candidates.iter().map(|c| c.film_id).collect();
    assert_eq!(ids, vec![2, 3, 4, 6]);

    let signals = load_user_signals(&index, 1).unwrap();
    let picks = recommend(
        &signals,
        candidates,
        &RecommenderConfig::default(),
        &mut StdRng::seed_from_u64(11),
    )
    .unwrap();

    assert_eq!(picks.len(), 4);
    let mut picked: Vec<u32> = picks.iter().map(|p| p.candidate.film_id).collect();
    picked.sort();
    assert_eq!(picked, vec![2, 3, 4, 6]);
}

#[test]
fn test_scores_reflect_profile() {
    let index = create_test_index();
    let candidates = candidates_for(&index, 1);
    let signals = load_user_signals(&index, 1).unwrap();

    let config = RecommenderConfig::default()
        .with_noise(0, 0)
        .with_shuffle_window(0);
    let recommender = Recommender::new(config).unwrap();
    let picks = recommender.recommend(&signals, candidates, &mut StdRng::seed_from_u64(0));

    // The Martian: Science Fiction weight 3 (30) + liked Science Fiction (15)
    // + liked director (25) + recent era (15)
    let martian = picks.iter().find(|p| p.candidate.film_id == 6).unwrap();
    assert_eq!(martian.breakdown.questionnaire, 30);
    assert_eq!(martian.breakdown.category_affinity, 15);
    assert_eq!(martian.breakdown.crew_affinity, 25);
    assert_eq!(martian.breakdown.era_bonus, 15);
    assert_eq!(martian.score, 85);

    assert_eq!(picks[0].candidate.film_id, 6);

    let paddington = picks.iter().find(|p| p.candidate.film_id == 4).unwrap();
    assert_eq!(paddington.score, 0);
    assert_eq!(picks.last().map(|p| p.candidate.film_id), Some(4));
}

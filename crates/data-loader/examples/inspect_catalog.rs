//! Load a catalog and summarize it.
//!
//! Run with: cargo run --package data-loader --example inspect_catalog -- data/sample_catalog.json

use data_loader::{DataIndex, QuizAnswer};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> data_loader::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample_catalog.json"));

    let start = Instant::now();
    let index = DataIndex::load_from_file(&path)?;
    let (users, films, watched) = index.counts();
    println!(
        "{}: {} films, {} users, {} watched entries ({:?})",
        path.display(),
        films,
        users,
        watched,
        start.elapsed()
    );

    let mut per_service: BTreeMap<String, usize> = BTreeMap::new();
    for film_id in index.get_all_film_ids() {
        let Some(film) = index.get_film(film_id) else { continue };
        for service_id in &film.streaming_services {
            let name = index
                .get_streaming_service(*service_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("#{}", service_id));
            *per_service.entry(name).or_default() += 1;
        }
    }
    println!("\nFilms per streaming service:");
    for (name, count) in &per_service {
        println!("  {:<16} {}", name, count);
    }

    println!("\nClassified answers:");
    for user_id in index.get_all_user_ids() {
        let answers = index.get_user_answers(user_id);
        let unrecognized = answers
            .iter()
            .filter(|a| **a == QuizAnswer::Unrecognized)
            .count();
        println!(
            "  user {:<4} {} answers, {} unrecognized",
            user_id,
            answers.len(),
            unrecognized
        );
    }

    Ok(())
}

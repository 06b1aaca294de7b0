use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, FilmId, UserId, default_questionnaire};
use pipeline::RecommenderConfig;
use rand::seq::IndexedRandom;
use server::{FilmRecommendation, RecommendationOrchestrator};
use signals::extract_profile;
use signals::user_context::load_user_signals;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Film Picker - preference-based film recommendations
#[derive(Parser)]
#[command(name = "film-picker")]
#[command(about = "Recommend films from quiz answers and rating history", long_about = None)]
struct Cli {
    /// Path to the JSON catalog
    #[arg(short, long, default_value = "data/sample_catalog.json")]
    catalog: PathBuf,

    /// Optional JSON file overriding scoring and ranking defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get film recommendations for a user
    Recommend {
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return (overrides the config)
        #[arg(long)]
        limit: Option<usize>,

        /// Fixed RNG seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,

        /// Show how each score was built
        #[arg(long)]
        explain: bool,
    },

    /// Show the preference profile extracted for a user
    Profile {
        #[arg(long)]
        user_id: UserId,
    },

    /// Print the default questionnaire
    Questions,

    /// Search for films by title
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: String,
    },

    /// Run many recommendation requests and report latency
    Benchmark {
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Questions = cli.command {
        handle_questions();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_file(&cli.catalog).context("Failed to load film catalog")?,
    );
    let (users, films, watched) = data_index.counts();
    println!(
        "{} Loaded {} films, {} users, {} watched entries in {:?}",
        "✓".green(),
        films,
        users,
        watched,
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            seed,
            explain,
        } => handle_recommend(data_index, config, user_id, limit, seed, explain).await?,
        Commands::Profile { user_id } => handle_profile(&data_index, &config, user_id)?,
        Commands::Search { title } => handle_search(&data_index, &title),
        Commands::Benchmark { requests } => handle_benchmark(data_index, config, requests).await?,
        Commands::Questions => {}
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    data_index: Arc<DataIndex>,
    mut config: RecommenderConfig,
    user_id: UserId,
    limit: Option<usize>,
    seed: Option<u64>,
    explain: bool,
) -> Result<()> {
    data_index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    if let Some(limit) = limit {
        config = config.with_result_size(limit);
        if limit > config.candidate_pool_size {
            config = config.with_candidate_pool_size(limit);
        }
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let orchestrator = RecommendationOrchestrator::from_data_index(data_index, config)?;
    let recommendations = orchestrator.get_recommendations(user_id).await?;

    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(data_index: &DataIndex, config: &RecommenderConfig, user_id: UserId) -> Result<()> {
    let user = data_index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;
    let raw = load_user_signals(data_index, user_id)?;
    let profile = extract_profile(&raw, config.high_rating_threshold);

    println!("{}", format!("User {} <{}>", user_id, user.email).bold().blue());

    let services: Vec<String> = user
        .streaming_services
        .iter()
        .map(|id| match data_index.get_streaming_service(*id) {
            Some(service) => service.name.clone(),
            None => format!("#{}", id),
        })
        .collect();
    println!("{}Streaming services: {}", "• ".green(), list_or_none(&services));
    println!("{}Quiz answers: {}", "• ".green(), raw.answers.len());
    println!("{}Watched films: {}", "• ".green(), raw.ratings.len());

    let era = profile
        .era
        .map(|era| format!("{:?}", era))
        .unwrap_or_else(|| "none (recent releases get a nudge)".to_string());
    println!("{}Preferred era: {}", "• ".cyan(), era);
    match profile.average_rating {
        Some(avg) => println!("{}Average review: {:.2}", "• ".cyan(), avg),
        None => println!("{}Average review: -", "• ".cyan()),
    }

    println!("{}", "Questionnaire weights:".bold());
    let weights = profile.category_weights.top(5);
    if weights.is_empty() {
        println!("  (none)");
    }
    for (category, weight) in weights {
        println!("  - {}: {:+}", category, weight);
    }

    println!("{}", "Liked (reviews >= threshold):".bold());
    print_counts("categories", profile.affinity.top_categories(5));
    print_counts("cast", profile.affinity.top_cast(5));
    print_counts("directors", profile.affinity.top_crew(5));

    Ok(())
}

/// Handle the 'questions' command
fn handle_questions() {
    println!("{}", "Questionnaire:".bold().blue());
    for (i, question) in default_questionnaire().iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), question.question);
        println!("   {}", question.available_answers.join(" / ").dimmed());
    }
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, title: &str) {
    let needle = title.to_lowercase();

    // Exact matches first, then substring matches, each by title
    let mut matches: Vec<(u8, FilmId)> = data_index
        .get_all_film_ids()
        .into_iter()
        .filter_map(|id| {
            let film = data_index.get_film(id)?;
            let haystack = film.title.to_lowercase();
            if haystack == needle {
                Some((0, id))
            } else if haystack.contains(&needle) {
                Some((1, id))
            } else {
                None
            }
        })
        .collect();
    matches.sort_by_key(|(rank, id)| (*rank, *id));

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no films found");
    }
    for (_, id) in matches.iter().take(20) {
        if let Some(film) = data_index.get_film(*id) {
            println!(
                "{}: {} ({}) [{}]",
                id,
                film.title,
                film.year(),
                film.categories.join(", ")
            );
        }
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    data_index: Arc<DataIndex>,
    config: RecommenderConfig,
    requests: usize,
) -> Result<()> {
    let user_ids = data_index.get_all_user_ids();
    if user_ids.is_empty() || requests == 0 {
        return Err(anyhow!("Benchmark needs at least one user and one request"));
    }

    let orchestrator = RecommendationOrchestrator::from_data_index(data_index, config)?;
    let mut rng = rand::rng();
    let targets: Vec<UserId> = (0..requests)
        .filter_map(|_| user_ids.choose(&mut rng).copied())
        .collect();

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(targets.len());
    for user_id in targets {
        let orchestrator = orchestrator.clone();
        handles.push(tokio::spawn(async move {
            let start = Instant::now();
            orchestrator.get_recommendations(user_id).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let sum: Duration = timings.iter().sum();
    let avg_latency = sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        timings.len() as f64 / total_time.as_secs_f64()
    );

    Ok(())
}

fn print_recommendations(recommendations: &[FilmRecommendation], explain: bool) {
    println!("{}", "Film Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  nothing left to recommend");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Score: {}",
            (i + 1).to_string().green(),
            rec.title,
            rec.year,
            rec.categories.join(", "),
            rec.score
        );
        if explain {
            println!("   {}", rec.explanation.dimmed());
        }
    }
}

fn print_counts(label: &str, counts: Vec<(&str, usize)>) {
    let rendered: Vec<String> = counts
        .into_iter()
        .map(|(name, count)| format!("{} x{}", name, count))
        .collect();
    println!("  - {}: {}", label, list_or_none(&rendered));
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

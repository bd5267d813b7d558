//! `metacritic_ratings` command-line entry point.
//!
//! Runs one lookup and prints the ratings as JSON on stdout (`null` when
//! nothing was found). Logs go to stderr; set `RUST_LOG=debug` to see each
//! candidate URL as it is tried.

use clap::Parser;
use metacritic_ratings::cli::Cli;
use metacritic_ratings::{Config, Metacritic, RatingProvider, build_fetcher};
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref()).await?;
    if let Some(base_url) = args.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    let fetcher = build_fetcher(&config)?;
    let provider = Metacritic::from_config(fetcher, &config);

    let ratings = provider
        .get_rating(args.media_type, &args.imdb_id, &args.stream_info())
        .await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&ratings)?
    } else {
        serde_json::to_string(&ratings)?
    };
    println!("{json}");

    let elapsed = start_time.elapsed();
    info!(
        provider = provider.name(),
        found = ratings.as_ref().map_or(0, Vec::len),
        millis = elapsed.as_millis() as u64,
        "Lookup complete"
    );

    Ok(())
}

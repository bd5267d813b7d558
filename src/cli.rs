//! Command-line interface definitions for Metacritic Ratings.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The base URL can also come from the environment.

use crate::models::{MediaType, StreamInfo};
use clap::Parser;

/// Command-line arguments for a single rating lookup.
///
/// # Examples
///
/// ```sh
/// # Movie with a known year
/// metacritic_ratings --name Inception --year 2010
///
/// # Series, year taken from the premiere date
/// metacritic_ratings --media-type series --name Severance --date 2022-02-18
///
/// # Against a mirror
/// METACRITIC_BASE_URL=http://localhost:8080 metacritic_ratings --name Inception
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Title to look up
    #[arg(short, long)]
    pub name: Option<String>,

    /// Kind of title
    #[arg(short = 't', long, value_enum, default_value_t = MediaType::Movie)]
    pub media_type: MediaType,

    /// IMDb id, only used to tag log lines
    #[arg(short, long, default_value = "-")]
    pub imdb_id: String,

    /// Release year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Release date (YYYY-MM-DD), used for the year when --year is absent
    #[arg(short, long)]
    pub date: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the Metacritic base URL
    #[arg(long, env = "METACRITIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// The title query described by the arguments.
    pub fn stream_info(&self) -> StreamInfo {
        StreamInfo {
            name: self.name.clone(),
            year: self.year.clone(),
            date: self.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "metacritic_ratings",
            "--name",
            "Inception",
            "--year",
            "2010",
        ]);

        assert_eq!(cli.name.as_deref(), Some("Inception"));
        assert_eq!(cli.media_type, MediaType::Movie);
        assert_eq!(cli.imdb_id, "-");
        assert!(!cli.pretty);
        assert_eq!(
            cli.stream_info(),
            StreamInfo {
                name: Some("Inception".to_string()),
                year: Some("2010".to_string()),
                date: None,
            }
        );
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "metacritic_ratings",
            "-n",
            "Severance",
            "-t",
            "series",
            "-i",
            "tt11280740",
            "-d",
            "2022-02-18",
        ]);

        assert_eq!(cli.media_type, MediaType::Series);
        assert_eq!(cli.imdb_id, "tt11280740");
        assert_eq!(cli.date.as_deref(), Some("2022-02-18"));
        assert_eq!(cli.year, None);
    }

    #[test]
    fn test_cli_without_name() {
        let cli = Cli::parse_from(["metacritic_ratings"]);
        assert_eq!(cli.stream_info().title(), None);
    }
}

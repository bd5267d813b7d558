//! # Metacritic Ratings
//!
//! Look up Metacritic critic and user scores for a movie or series.
//!
//! Metacritic has no API and no search endpoint worth scraping, so the
//! provider guesses a few page URLs from the title slug and year, fetches them
//! one by one, and reads the scores from the first page that has any.
//!
//! ## Architecture
//!
//! 1. **Candidates**: Build the ordered URL list for the title
//! 2. **Fetching**: Request each page in turn through a [`http::PageFetcher`]
//! 3. **Extraction**: Pull and validate the Metascore and user score
//!
//! ## Usage
//!
//! ```ignore
//! use metacritic_ratings::{
//!     Config, MediaType, Metacritic, RatingProvider, StreamInfo, build_fetcher,
//! };
//!
//! let config = Config::load(None).await?;
//! let provider = Metacritic::from_config(build_fetcher(&config)?, &config);
//! let info = StreamInfo { name: Some("Inception".into()), year: Some("2010".into()), date: None };
//! let ratings = provider.get_rating(MediaType::Movie, "tt1375666", &info).await;
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod models;
pub mod providers;
pub mod utils;

pub use config::Config;
pub use http::{FetchError, FetchedPage, HttpPageFetcher, PageFetcher, RetryFetch, build_fetcher};
pub use models::{MediaType, RatingResult, StreamInfo};
pub use providers::RatingProvider;
pub use providers::metacritic::Metacritic;

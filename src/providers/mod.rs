//! Rating providers.
//!
//! Each submodule scrapes one external rating site. A provider turns a
//! [`StreamInfo`] into a list of [`RatingResult`]s, or `None` when the site has
//! nothing usable for that title.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Metacritic | [`metacritic`] | HTML scraping | Guesses page URLs from the title slug and year |
//!
//! # Common Patterns
//!
//! Providers:
//! - Fetch through a [`crate::http::PageFetcher`], never `reqwest` directly
//! - Never fail outward: lookup and parse problems are logged and become `None`
//! - Try candidate pages strictly one after another, stopping at the first hit

use crate::models::{MediaType, RatingResult, StreamInfo};

pub mod metacritic;

/// Common interface of every rating source.
pub trait RatingProvider {
    /// Display name used in logs and as the fetch caller label.
    fn name(&self) -> &'static str;

    /// Look up ratings for a title.
    ///
    /// # Arguments
    ///
    /// * `media_type` - Movie or series
    /// * `imdb_id` - External identifier, only used to correlate log lines
    /// * `info` - The title, and optionally its year or release date
    ///
    /// # Returns
    ///
    /// A non-empty list of ratings, or `None`.
    async fn get_rating(
        &self,
        media_type: MediaType,
        imdb_id: &str,
        info: &StreamInfo,
    ) -> Option<Vec<RatingResult>>;
}

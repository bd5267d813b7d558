//! Data models for rating lookups.
//!
//! This module defines the types passed in and out of a rating provider:
//! - [`MediaType`]: Whether the title is a movie or a series
//! - [`StreamInfo`]: The title-bearing query describing what to look up
//! - [`RatingResult`]: One score scraped from a provider page
//!
//! `StreamInfo` and `RatingResult` are serde types so they can travel as
//! JSON between this crate and whatever catalog feeds it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media being rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Path segment Metacritic uses for this media type.
    pub fn path_segment(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => f.write_str("movie"),
            MediaType::Series => f.write_str("series"),
        }
    }
}

/// Descriptive data about a title, as handed over by the caller.
///
/// Every field is optional because upstream catalogs are inconsistent; a
/// lookup only happens when `name` carries usable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamInfo {
    /// Display title, e.g. `"Inception"`.
    #[serde(default)]
    pub name: Option<String>,
    /// Release year as text, e.g. `"2010"`.
    #[serde(default)]
    pub year: Option<String>,
    /// Release date shaped like `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

impl StreamInfo {
    /// The title, if it is present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A single score scraped from a provider page.
///
/// # Fields
///
/// * `source` - Which score this is (`"MC"` for critics, `"MC Users"` for users)
/// * `value` - The formatted score, `"74/100"` or `"8.3/10"`
/// * `url` - The page the score was read from
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RatingResult {
    pub source: String,
    pub value: String,
    pub url: String,
}

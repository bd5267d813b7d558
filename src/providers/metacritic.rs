//! Metacritic rating scraper.
//!
//! Metacritic has no public API, so this provider guesses the page URL for a
//! title and reads the scores out of the HTML.
//!
//! # URL Pattern
//!
//! Pages live at `{base}/movie/{slug}` and `{base}/tv/{slug}`. When two titles
//! share a slug the site appends the year, and when two share slug and year it
//! appends `-2` as well. Candidates are tried most specific first:
//!
//! ```text
//! {base}/movie/inception-2010
//! {base}/movie/inception
//! {base}/movie/inception-2010-2
//! ```
//!
//! # Scores
//!
//! - Critic Metascore, integer 0-100, reported as `"MC"` / `"N/100"`
//! - User score, 0-10 with an optional decimal, reported as `"MC Users"` / `"N.n/10"`

use super::RatingProvider;
use crate::config::Config;
use crate::http::PageFetcher;
use crate::models::{MediaType, RatingResult, StreamInfo};
use crate::utils::{format_title_for_url_slug, resolve_year};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

pub const PROVIDER_NAME: &str = "Metacritic";

const CRITIC_SOURCE: &str = "MC";
const USER_SOURCE: &str = "MC Users";

static CRITIC_SCORE_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="critic-score-info"] .c-siteReviewScore span"#).ok()
});
static USER_SCORE_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="user-score-info"] .c-siteReviewScore span"#).ok()
});

/// Build the ordered list of page URLs to try for a title.
///
/// With a year the list has three entries (`slug-year`, `slug`,
/// `slug-year-2`); without one it is just `slug`. The same input always
/// produces the same list.
pub fn build_candidate_urls(
    base_url: &str,
    title: &str,
    media_type: MediaType,
    year: &str,
) -> Vec<String> {
    let segment = media_type.path_segment();
    let slug = format_title_for_url_slug(title);
    let year = year.trim();

    let mut urls = Vec::with_capacity(3);
    if !year.is_empty() {
        urls.push(format!("{base_url}/{segment}/{slug}-{year}"));
    }
    urls.push(format!("{base_url}/{segment}/{slug}"));
    if !year.is_empty() {
        urls.push(format!("{base_url}/{segment}/{slug}-{year}-2"));
    }
    urls
}

/// Text of the first element matching `selector`, trimmed.
///
/// A selector that failed to parse is treated like one that matches nothing.
fn first_text(document: &Html, selector: Option<&Selector>) -> Option<String> {
    document
        .select(selector?)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a Metascore: digits only, 0 to 100 inclusive.
pub fn parse_critic_score(text: &str) -> Option<u32> {
    if !is_digits(text) {
        return None;
    }
    text.parse::<u32>().ok().filter(|score| *score <= 100)
}

/// Parse a user score: digits with an optional fractional part, 0 to 10 inclusive.
pub fn parse_user_score(text: &str) -> Option<f64> {
    let well_formed = match text.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => is_digits(text),
    };
    if !well_formed {
        return None;
    }
    text.parse::<f64>()
        .ok()
        .filter(|score| (0.0..=10.0).contains(score))
}

/// Extract critic and user scores from a Metacritic title page.
///
/// Missing, non-numeric and out-of-range scores are skipped silently; pages
/// often have no user score yet (`"tbd"`).
///
/// # Returns
///
/// The scores that passed validation, critic first, or `None` if neither did.
pub fn scrape_metacritic_page(html: &str, url: &str) -> Option<Vec<RatingResult>> {
    let document = Html::parse_document(html);
    let mut results = Vec::with_capacity(2);

    if let Some(score) = first_text(&document, CRITIC_SCORE_SELECTOR.as_ref())
        .as_deref()
        .and_then(parse_critic_score)
    {
        results.push(RatingResult {
            source: CRITIC_SOURCE.to_string(),
            value: format!("{score}/100"),
            url: url.to_string(),
        });
    }

    if let Some(score) = first_text(&document, USER_SCORE_SELECTOR.as_ref())
        .as_deref()
        .and_then(parse_user_score)
    {
        results.push(RatingResult {
            source: USER_SOURCE.to_string(),
            value: format!("{score}/10"),
            url: url.to_string(),
        });
    }

    if results.is_empty() { None } else { Some(results) }
}

/// Metacritic provider over any [`PageFetcher`].
#[derive(Debug)]
pub struct Metacritic<F> {
    fetcher: F,
    base_url: String,
}

impl<F> Metacritic<F>
where
    F: PageFetcher,
{
    /// `base_url` is the site root without a trailing slash.
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(fetcher: F, config: &Config) -> Self {
        Self::new(fetcher, config.metacritic_base_url.clone())
    }
}

impl<F> RatingProvider for Metacritic<F>
where
    F: PageFetcher,
{
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Try each candidate page in order and return the first one with scores.
    ///
    /// Candidates are fetched one at a time. A non-200 status, a fetch error
    /// and a page without scores all move on to the next candidate.
    #[instrument(level = "info", skip(self, info), fields(provider = PROVIDER_NAME))]
    async fn get_rating(
        &self,
        media_type: MediaType,
        imdb_id: &str,
        info: &StreamInfo,
    ) -> Option<Vec<RatingResult>> {
        let Some(title) = info
            .title()
            .filter(|title| !format_title_for_url_slug(title).is_empty())
        else {
            warn!(provider = PROVIDER_NAME, %imdb_id, "Skipping lookup: no usable title");
            return None;
        };

        let year = resolve_year(info);
        let urls = build_candidate_urls(&self.base_url, title, media_type, &year);

        for url in &urls {
            debug!(provider = PROVIDER_NAME, %url, "Trying candidate");
            match self.fetcher.fetch_page(url, PROVIDER_NAME).await {
                Ok(page) if page.is_ok() => {
                    if let Some(results) = scrape_metacritic_page(&page.body, url) {
                        info!(
                            provider = PROVIDER_NAME,
                            %url,
                            count = results.len(),
                            "Found ratings"
                        );
                        return Some(results);
                    }
                    debug!(provider = PROVIDER_NAME, %url, "Page has no usable scores");
                }
                Ok(page) => {
                    debug!(
                        provider = PROVIDER_NAME,
                        %url,
                        status = page.status,
                        "Candidate not available"
                    );
                }
                Err(e) => {
                    debug!(provider = PROVIDER_NAME, %url, error = %e, "Candidate fetch failed");
                }
            }
        }

        debug!(
            provider = PROVIDER_NAME,
            tried = urls.len(),
            %title,
            "No candidate yielded ratings"
        );
        None
    }
}

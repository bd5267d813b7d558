//! Text helpers shared by the providers.
//!
//! This module provides:
//! - Slug formatting for building provider page URLs
//! - Year resolution from the loosely-typed [`StreamInfo`] fields
//! - String truncation for log output

use crate::models::StreamInfo;

/// Convert a title to the slug form used in provider page URLs.
///
/// The title is lowercased, apostrophes and quote marks are dropped, and every
/// other run of non-alphanumeric characters collapses into a single hyphen.
/// Leading and trailing hyphens never appear. Non-ASCII letters are kept and
/// percent-encoded so the result is always URL-safe.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_title_for_url_slug("Spider-Man: No Way Home"), "spider-man-no-way-home");
/// assert_eq!(format_title_for_url_slug("Ocean's Eleven"), "oceans-eleven");
/// ```
pub fn format_title_for_url_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if !is_quote(c) {
            pending_dash = true;
        }
    }

    urlencoding::encode(&slug).into_owned()
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '`')
}

/// Work out the release year for a lookup.
///
/// An explicit, non-blank `year` wins. Otherwise the part of `date` before
/// its first `-` is used. When neither is present the result is empty, which
/// callers treat as "no year".
pub fn resolve_year(info: &StreamInfo) -> String {
    if let Some(year) = info
        .year
        .as_deref()
        .map(str::trim)
        .filter(|y| !y.is_empty())
    {
        return year.to_string();
    }

    info.date
        .as_deref()
        .and_then(|date| date.split('-').next())
        .map(|y| y.trim().to_string())
        .unwrap_or_default()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a byte
/// count of what was dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(year: Option<&str>, date: Option<&str>) -> StreamInfo {
        StreamInfo {
            name: Some("Inception".to_string()),
            year: year.map(str::to_string),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(format_title_for_url_slug("Inception"), "inception");
        assert_eq!(format_title_for_url_slug("The Dark Knight"), "the-dark-knight");
    }

    #[test]
    fn test_slug_punctuation() {
        assert_eq!(
            format_title_for_url_slug("Spider-Man: No Way Home"),
            "spider-man-no-way-home"
        );
        assert_eq!(format_title_for_url_slug("Ocean's Eleven"), "oceans-eleven");
        assert_eq!(format_title_for_url_slug("  Multiple   Spaces!! "), "multiple-spaces");
        assert_eq!(format_title_for_url_slug("M*A*S*H"), "m-a-s-h");
    }

    #[test]
    fn test_slug_non_ascii_is_encoded() {
        assert_eq!(format_title_for_url_slug("Amélie"), "am%C3%A9lie");
    }

    #[test]
    fn test_slug_empty() {
        assert_eq!(format_title_for_url_slug(""), "");
        assert_eq!(format_title_for_url_slug("?!"), "");
    }

    #[test]
    fn test_resolve_year_prefers_explicit_year() {
        assert_eq!(resolve_year(&info(Some("2010"), Some("2009-07-16"))), "2010");
    }

    #[test]
    fn test_resolve_year_falls_back_to_date() {
        assert_eq!(resolve_year(&info(None, Some("2010-07-16"))), "2010");
        assert_eq!(resolve_year(&info(Some(""), Some("2010-07-16"))), "2010");
        assert_eq!(resolve_year(&info(Some("  "), Some("1999"))), "1999");
    }

    #[test]
    fn test_resolve_year_empty_when_missing() {
        assert_eq!(resolve_year(&info(None, None)), "");
        assert_eq!(resolve_year(&info(None, Some(""))), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééé", 1);
        assert_eq!(result, "é…(+4 bytes)");
    }
}

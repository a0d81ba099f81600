//! Feed query engine: filter the post set, then order it.
//!
//! [`compute`] is a pure function of the post set and the current
//! [`FilterState`]. Filters are applied in a fixed order (text, category,
//! media type) so the result never depends on which control changed last.

use super::types::{FilterState, Post, SortKey};
use chrono::{DateTime, NaiveDate};
use feruca::Collator;
use std::cmp::Ordering;
use std::sync::Arc;

/// Year used for dates that carry only a day and month ("7th July").
///
/// A leap year, so "29th February" still parses.
pub const YEARLESS_REFERENCE_YEAR: i32 = 2000;

/// Compute the ordered list of visible posts.
///
/// The returned vector is freshly allocated on every call; `posts` is never
/// reordered. `Arc` clones keep this O(n) in pointer copies.
pub fn compute(posts: &[Arc<Post>], filter: &FilterState) -> Vec<Arc<Post>> {
    let needle = search_needle(&filter.search_text);

    let mut visible: Vec<Arc<Post>> = posts
        .iter()
        .filter(|post| needle.as_deref().map_or(true, |n| matches_text(post, n)))
        .filter(|post| filter.category.matches(post.category))
        .filter(|post| filter.media_type.matches(post.media_type))
        .cloned()
        .collect();

    sort_posts(&mut visible, filter.sort_key);
    visible
}

/// Lowercased search needle, or `None` when the text filter is a no-op.
///
/// Blank input disables the filter, but non-blank input is matched as typed
/// (surrounding spaces included).
fn search_needle(search_text: &str) -> Option<String> {
    if search_text.trim().is_empty() {
        None
    } else {
        Some(search_text.to_lowercase())
    }
}

/// Case-insensitive substring match against author, caption or location.
fn matches_text(post: &Post, needle: &str) -> bool {
    post.user_name.to_lowercase().contains(needle)
        || post.caption.to_lowercase().contains(needle)
        || post.location.to_lowercase().contains(needle)
}

/// Stable in-place sort by the given key.
pub fn sort_posts(posts: &mut [Arc<Post>], key: SortKey) {
    match key {
        SortKey::Date => {
            // Parse once per post rather than once per comparison
            let mut keyed: Vec<(Option<NaiveDate>, Arc<Post>)> = posts
                .iter()
                .map(|p| (parse_post_date(&p.date), Arc::clone(p)))
                .collect();
            // Descending; `None` compares below every date so it sorts last
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
            for (slot, (_, post)) in posts.iter_mut().zip(keyed) {
                *slot = post;
            }
        }
        SortKey::Views => posts.sort_by(|a, b| b.views.cmp(&a.views)),
        SortKey::Name => {
            let mut collator = Collator::default();
            posts.sort_by(|a, b| collator.collate(a.user_name.as_str(), b.user_name.as_str()));
        }
        SortKey::Original => {}
    }
}

/// Locale-aware name comparison using the Unicode Collation Algorithm with
/// the CLDR root tailoring.
///
/// Accents and case are secondary and tertiary differences, so "Émile" sorts
/// with the E names and "anya" next to "Anya". Code points break full ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Parse a post's display date into a comparable date.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, and day/month forms with optional ordinal
/// suffix and optional year: "7th July", "22nd July 2024", "July 7, 2024",
/// "7 Jul". Returns `None` for anything else.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    let normalized = s
        .replace(',', " ")
        .split_whitespace()
        .map(strip_ordinal)
        .collect::<Vec<_>>()
        .join(" ");

    const FORMATS: [&str; 2] = ["%d %B %Y", "%B %d %Y"];
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, fmt) {
            return Some(date);
        }
    }

    let with_year = format!("{} {}", normalized, YEARLESS_REFERENCE_YEAR);
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, fmt) {
            return Some(date);
        }
    }

    None
}

/// "7th" → "7", "22nd" → "22"; anything else is returned unchanged.
fn strip_ordinal(token: &str) -> &str {
    let digits = token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return token;
    }
    let suffix = token[digits.len()..].to_ascii_lowercase();
    match suffix.as_str() {
        "st" | "nd" | "rd" | "th" => digits,
        _ => token,
    }
}

// ============================================================================
// Tests
// ============================================================================

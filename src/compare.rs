//! Title/year matching between a query and scraped search results.

use crate::media::MediaQuery;

/// Decides whether a scraped search result refers to the queried media.
pub trait TitleComparator: Send + Sync {
    fn matches(&self, query: &MediaQuery, title: &str, year: Option<u32>) -> bool;
}

/// Compares normalized titles; years only have to agree when both sides know one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedTitleComparator;

impl TitleComparator for NormalizedTitleComparator {
    fn matches(&self, query: &MediaQuery, title: &str, year: Option<u32>) -> bool {
        let same_year = match (query.year(), year) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        same_year && normalize_title(query.title()) == normalize_title(title)
    }
}

/// Lowercase, strip a trailing "the movie"/"the series", drop quotes and
/// colons, and collapse every other non-alphanumeric run into `_`.
pub fn normalize_title(title: &str) -> String {
    let mut t = title.trim().to_lowercase();
    for suffix in ["the movie", "the series"] {
        if t != suffix && t.ends_with(suffix) {
            t.truncate(t.len() - suffix.len());
        }
    }

    let mut out = String::with_capacity(t.len());
    let mut in_gap = false;
    for c in t.chars().filter(|c| !matches!(c, '\'' | '"' | ':')) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push('_');
            in_gap = true;
        }
    }
    out
}

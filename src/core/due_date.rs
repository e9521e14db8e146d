//! Due dates arrive from the backend as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or
//! `YYYY-MM-DDTHH:MM:SS...`. Only the calendar date is meaningful to the client.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static BARE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// The date portion of a due-date string, with any time-of-day suffix removed.
pub fn date_part(raw: &str) -> &str {
    let raw = raw.trim();
    if let Some((date, _)) = raw.split_once(' ') {
        date
    } else if let Some((date, _)) = raw.split_once('T') {
        date
    } else {
        raw
    }
}

/// Parse the calendar date of a due-date string.
pub fn parse(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(raw), "%Y-%m-%d").ok()
}

/// Expand a bare `YYYY-MM-DD` into the `YYYY-MM-DD 00:00:00` form the backend expects.
/// Anything else is passed through untouched.
pub fn expand_for_transmission(raw: &str) -> String {
    if BARE_DATE_RE.is_match(raw) {
        format!("{} 00:00:00", raw)
    } else {
        raw.to_string()
    }
}

/// Human-readable form used on task cards, e.g. `Jan 15, 2024`.
pub fn format_display(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.is_empty()) {
        None => "No due date".to_string(),
        Some(raw) => match parse(raw) {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => raw.to_string(),
        },
    }
}

pub fn is_overdue(raw: Option<&str>, today: NaiveDate) -> bool {
    raw.and_then(parse).is_some_and(|due| due < today)
}

//! Season, part and year signals.
//!
//! Each extractor works on a canonical string and reports the marker it
//! picked together with its byte span, so the title builder can cut the
//! marker out of the base title. Extractors check their pattern tiers in a
//! fixed priority order; inside a tier the leftmost match wins.

pub mod numeral;
pub mod part;
pub mod season;
pub mod year;

use regex::Regex;

use crate::canonical::canonicalize;

/// Sentinel used by the public contract for "no signal".
pub const NOT_FOUND: i32 = -1;

/// A season, part or year marker found in a canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Parsed value.
    pub value: u32,
    /// Byte offset where the marker starts.
    pub start: usize,
    /// Byte offset one past the marker end.
    pub end: usize,
}

impl Marker {
    /// The marker text within the string it was extracted from.
    pub fn raw<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn overlaps(&self, other: &Marker) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Words after which a number is a counter of something else.
const COUNTER_WORDS: &[&str] = &[
    "ep", "eps", "episode", "episodes", "e", "vol", "volume", "no", "number", "part", "cour",
    "chapter", "ch", "act", "round", "stage", "level", "lv", "#",
];

/// Extract the season number from a title, or `-1`.
pub fn extract_season_number(title: &str) -> i32 {
    season::find(&canonicalize(title)).map_or(NOT_FOUND, |m| m.value as i32)
}

/// Extract the part/cour number from a title, or `-1`.
pub fn extract_part_number(title: &str) -> i32 {
    part::find(&canonicalize(title)).map_or(NOT_FOUND, |m| m.value as i32)
}

/// Extract a plausible release year from a title, or `-1`.
pub fn extract_year(title: &str) -> i32 {
    year::find(&canonicalize(title)).map_or(NOT_FOUND, |m| m.value as i32)
}

/// Every match of `re` whose value group parses.
///
/// The value comes from the group named `n`; the span covers the group named
/// `marker` when the pattern has one, otherwise the whole match.
pub(crate) fn scan_all<'t>(
    re: &'t Regex,
    text: &'t str,
    value: fn(&str) -> Option<u32>,
) -> impl Iterator<Item = Marker> + 't {
    re.captures_iter(text).filter_map(move |caps| {
        let number = value(caps.name("n")?.as_str())?;
        let span = caps.name("marker").or_else(|| caps.get(0))?;
        Some(Marker {
            value: number,
            start: span.start(),
            end: span.end(),
        })
    })
}

/// Pick the leftmost marker among candidates from one priority tier.
pub(crate) fn leftmost(candidates: impl IntoIterator<Item = Option<Marker>>) -> Option<Marker> {
    candidates.into_iter().flatten().min_by_key(|m| m.start)
}

/// Whether the word right before byte `start` is a counter word ("Vol 2").
pub(crate) fn preceded_by_counter(text: &str, start: usize) -> bool {
    let head = text[..start].trim_end();
    if head.ends_with('#') {
        return true;
    }
    head.rsplit(|c: char| c.is_whitespace())
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .is_some_and(|w| COUNTER_WORDS.contains(&w.as_str()))
}

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use super::Marker;

/// Earliest year accepted as a release year.
pub const MIN_YEAR: u32 = 1900;

/// Years this far past the current one are still accepted (announced titles).
const FUTURE_SLACK: i32 = 2;

/// Runs of ASCII digits. Word boundaries are avoided so "2024年" still splits.
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Words that make an adjacent number read as a season/part counter.
const SIGNAL_WORDS: &[&str] = &["season", "saison", "series", "part", "cour"];

/// Latest year accepted as a release year.
pub fn max_year() -> u32 {
    (chrono::Local::now().year() + FUTURE_SLACK).max(MIN_YEAR as i32) as u32
}

/// Find a release year in a canonical string.
///
/// Only 4-digit runs not glued to Latin letters count ("x2640" and "1080p" do
/// not). When several plausible years exist, the leftmost one that is not
/// next to a season/part keyword wins; if every candidate is, the leftmost
/// candidate is used anyway. A parenthesised year's span covers the
/// parentheses.
pub fn find(text: &str) -> Option<Marker> {
    let max = max_year();
    let candidates: Vec<Marker> = RE_DIGITS
        .find_iter(text)
        .filter(|m| m.as_str().len() == 4)
        .filter(|m| !glued_to_letter(text, m.start(), m.end()))
        .filter_map(|m| {
            let value: u32 = m.as_str().parse().ok()?;
            (MIN_YEAR..=max).contains(&value).then(|| widen_parens(text, value, m.start(), m.end()))
        })
        .collect();

    candidates
        .iter()
        .find(|m| !next_to_signal_word(text, m))
        .or_else(|| candidates.first())
        .copied()
}

fn glued_to_letter(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_alphabetic()) || after.is_some_and(|c| c.is_ascii_alphabetic())
}

/// "(2011)" → span over the parentheses too.
fn widen_parens(text: &str, value: u32, start: usize, end: usize) -> Marker {
    if text[..start].ends_with('(') && text[end..].starts_with(')') {
        Marker {
            value,
            start: start - 1,
            end: end + 1,
        }
    } else {
        Marker { value, start, end }
    }
}

/// Whether the word before or after the year is a season/part keyword, or
/// the next word is an ordinal ("2024 2nd Season"). Parenthesised years are
/// never counters.
fn next_to_signal_word(text: &str, m: &Marker) -> bool {
    if m.raw(text).starts_with('(') {
        return false;
    }
    let clean = |w: &str| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();

    let prev = text[..m.start].split_whitespace().next_back().map(clean);
    let next = text[m.end..].split_whitespace().next().map(clean);

    let is_signal = |w: &Option<String>| w.as_deref().is_some_and(|w| SIGNAL_WORDS.contains(&w));
    let is_ordinal = |w: &Option<String>| {
        w.as_deref().is_some_and(|w| {
            let digits = w.trim_end_matches(|c: char| c.is_ascii_alphabetic());
            !digits.is_empty()
                && digits.len() < w.len()
                && digits.chars().all(|c| c.is_ascii_digit())
                && matches!(&w[digits.len()..], "st" | "nd" | "rd" | "th")
        })
    };

    is_signal(&prev) || is_signal(&next) || is_ordinal(&next)
}

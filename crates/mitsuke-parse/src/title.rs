use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize;
use crate::extract::{part, season, year, Marker, NOT_FOUND};
use crate::query::sanitize_query;
use crate::tokens::{is_format_word, is_noise, is_stopword, significant_tokens};

/// Structured record for one title variant.
///
/// Not-found season/part/year are `-1`, so there is deliberately no
/// `Default` impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTitle {
    /// The untouched input.
    pub original: String,
    /// Canonical form, case preserved.
    pub normalized: String,
    /// `normalized` without season/part/year markers and format words.
    pub clean_base_title: String,
    /// `clean_base_title` without noise words.
    pub denoised_title: String,
    /// Lowercased significant tokens of `denoised_title`.
    pub tokens: Vec<String>,
    pub season: i32,
    pub part: i32,
    pub year: i32,
    /// Primary variant among the titles supplied for one media item.
    pub is_main: bool,
}

impl NormalizedTitle {
    /// Build the record for a supplementary variant.
    pub fn new(title: &str) -> Self {
        build(title, false)
    }

    /// Build the record for the primary variant.
    pub fn main(title: &str) -> Self {
        build(title, true)
    }

    /// The most reduced form that still sanitizes to something non-empty.
    ///
    /// Falls back from the denoised title to the clean base, the canonical
    /// form and finally the raw input. Empty only for blank input.
    pub fn search_form(&self) -> String {
        [
            &self.denoised_title,
            &self.clean_base_title,
            &self.normalized,
            &self.original,
        ]
        .into_iter()
        .map(|s| sanitize_query(s))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
    }
}

/// Build a [`NormalizedTitle`] for a single title.
pub fn normalize_title(title: &str) -> NormalizedTitle {
    NormalizedTitle::new(title)
}

fn build(title: &str, is_main: bool) -> NormalizedTitle {
    let normalized = canonicalize(title);

    let season_marker = season::find(&normalized);
    let part_marker = part::find(&normalized);
    let year_marker = year::find(&normalized);

    let mut spans: Vec<Marker> = season::markers(&normalized);
    spans.extend(part::markers(&normalized));
    spans.extend(season_marker);
    spans.extend(year_marker);

    let stripped = cut_spans(&normalized, spans);
    let clean_base_title = tidy(without_format_words(&stripped).into_iter());
    let denoised_title = tidy(clean_base_title.split_whitespace().filter(|w| !is_noise(w)));
    let tokens = significant_tokens(&denoised_title);

    tracing::trace!(
        title,
        clean = %clean_base_title,
        season = ?season_marker.map(|m| m.value),
        part = ?part_marker.map(|m| m.value),
        "normalized title"
    );

    NormalizedTitle {
        original: title.to_string(),
        normalized,
        clean_base_title,
        denoised_title,
        tokens,
        season: sentinel(season_marker),
        part: sentinel(part_marker),
        year: sentinel(year_marker),
        is_main,
    }
}

fn sentinel(marker: Option<Marker>) -> i32 {
    marker.map_or(NOT_FOUND, |m| m.value as i32)
}

/// Replace every marker span with a space. Overlapping spans merge.
fn cut_spans(text: &str, mut spans: Vec<Marker>) -> String {
    spans.sort_by_key(|m| m.start);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for m in spans {
        if m.start > pos {
            out.push_str(&text[pos..m.start]);
            out.push(' ');
        }
        pos = pos.max(m.end);
    }
    out.push_str(&text[pos.min(text.len())..]);
    out
}

/// Drop format words along with an article left hanging in front of them
/// ("Academia the Movie" → "Academia"). A leading article stays.
fn without_format_words(text: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if is_format_word(word) {
            if out.len() > 1 && out.last().is_some_and(|w| is_stopword(w)) {
                out.pop();
            }
            continue;
        }
        out.push(word);
    }
    out
}

fn is_separator(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| matches!(c, '-' | ':' | '|' | '/' | '~' | '+'))
}

fn is_empty_bracket(word: &str) -> bool {
    matches!(word, "()" | "[]" | "{}")
}

/// Re-join words after markers were cut out.
///
/// A lone ":" sticks to the word before it, separators never lead, trail or
/// repeat, and bracket pairs left empty are dropped.
fn tidy<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut out: Vec<String> = Vec::new();

    for word in words {
        if is_empty_bracket(word) {
            continue;
        }
        if word == ":" {
            if let Some(last) = out.last_mut() {
                if !last.ends_with(':') && !is_separator(last) {
                    last.push(':');
                }
            }
            continue;
        }
        if is_separator(word) {
            let after_separator = out
                .last()
                .is_some_and(|last| is_separator(last) || last.ends_with(':'));
            if out.is_empty() || after_separator {
                continue;
            }
        }
        out.push(word.to_string());
    }

    while out.last().is_some_and(|w| is_separator(w)) {
        out.pop();
    }
    if let Some(last) = out.last_mut() {
        let trimmed_len = last.trim_end_matches(':').len();
        last.truncate(trimmed_len);
    }

    out.join(" ")
}

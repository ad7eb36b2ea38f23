use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::extract::NOT_FOUND;
use crate::query::sanitize_query;
use crate::title::NormalizedTitle;

/// Search-ready variants for one media item plus its resolved season/part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSearchResult {
    pub titles: Vec<String>,
    pub season: i32,
    pub part: i32,
}

/// Build records for every non-blank variant. The first one is the main one.
pub fn normalize_variants<S: AsRef<str>>(titles: &[S]) -> Vec<NormalizedTitle> {
    titles
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.trim().is_empty())
        .enumerate()
        .map(|(i, t)| {
            if i == 0 {
                NormalizedTitle::main(t)
            } else {
                NormalizedTitle::new(t)
            }
        })
        .collect()
}

/// Turn all known titles of one media item into deduplicated search titles.
///
/// Input order is the caller's confidence ranking (romaji, English,
/// synonyms), so season and part come from the first variant that names
/// one. Every variant contributes its search form, its clean base title and
/// the part before a ":" or " - " subtitle separator.
pub fn build_smart_search_titles<S: AsRef<str>>(titles: &[S]) -> SmartSearchResult {
    let records = normalize_variants(titles);

    let season = first_found(records.iter().map(|r| r.season));
    let part = first_found(records.iter().map(|r| r.part));
    tracing::trace!(variants = records.len(), season, part, "resolved season/part");

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut add = |candidate: String| {
        if !candidate.is_empty() && seen.insert(candidate.to_lowercase()) {
            out.push(candidate);
        }
    };

    for record in &records {
        add(record.search_form());
        add(sanitize_query(&record.clean_base_title));
        for prefix in subtitle_prefixes(&record.clean_base_title) {
            add(sanitize_query(prefix));
        }
    }

    SmartSearchResult {
        titles: out,
        season,
        part,
    }
}

fn first_found(mut values: impl Iterator<Item = i32>) -> i32 {
    values
        .find(|&v| v != NOT_FOUND)
        .unwrap_or(NOT_FOUND)
}

/// Series names in front of a colon or " - " subtitle.
///
/// A colon prefix too short to be a title ("Re" in "Re:Zero") is skipped in
/// favour of a later colon.
fn subtitle_prefixes(title: &str) -> Vec<&str> {
    let colon = title
        .match_indices(':')
        .map(|(i, _)| title[..i].trim())
        .find(|p| is_meaningful(p));
    let dash = title
        .find(" - ")
        .map(|i| title[..i].trim())
        .filter(|p| is_meaningful(p));

    colon.into_iter().chain(dash).collect()
}

fn is_meaningful(prefix: &str) -> bool {
    prefix.chars().filter(|c| c.is_alphanumeric()).count() > 2
}

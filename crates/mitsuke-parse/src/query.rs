//! Indexer query strings.
//!
//! The only syntax assumed of the indexer is `(a | b)` OR-grouping plus a
//! handful of reserved characters, which [`sanitize_query`] removes.

use std::collections::HashSet;

use crate::extract::numeral::{ordinal, to_roman};
use crate::title::NormalizedTitle;

/// Characters with meaning in indexer query syntax. The colon is included
/// so "Re:Zero" searches as "Re Zero".
fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '|'
            | '"'
            | '\''
            | '`'
            | '~'
            | '*'
            | '?'
            | '\\'
            | '^'
            | '!'
            | ':'
            | '\u{2018}'
            | '\u{2019}'
            | '\u{201C}'
            | '\u{201D}'
    )
}

/// Strip reserved characters and collapse whitespace.
///
/// A dash leading a word would read as exclusion, so it is dropped too.
pub fn sanitize_query(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if is_reserved(c) { ' ' } else { c })
        .collect();

    replaced
        .split_whitespace()
        .map(|w| w.trim_start_matches('-'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compact query for one title: the denoised form, falling back to less
/// reduced forms when noise removal leaves nothing.
///
/// Empty only when the input has nothing but whitespace and reserved
/// characters.
pub fn build_search_query(title: &str) -> String {
    NormalizedTitle::new(title).search_form()
}

/// OR-group the search forms of several titles.
///
/// Duplicates (case-insensitive) and titles with an empty search form are
/// skipped. One survivor is returned bare, none yields an empty string.
pub fn build_advanced_query<S: AsRef<str>>(titles: &[S]) -> String {
    let mut seen = HashSet::new();
    let parts: Vec<String> = titles
        .iter()
        .map(|t| build_search_query(t.as_ref()))
        .filter(|q| !q.is_empty())
        .filter(|q| seen.insert(q.to_lowercase()))
        .collect();

    or_group(&parts)
}

/// Query covering the common release spellings of a season.
///
/// Seasons below 2 return the plain query: first seasons are mostly
/// released without a marker.
pub fn build_season_query(title: &str, season: i32) -> String {
    let base = build_search_query(title);
    if season <= 1 || base.is_empty() {
        return base;
    }
    let n = season as u32;
    or_group(&[
        format!("{base} S{n:02}"),
        format!("{base} Season {n}"),
        format!("{base} {} Season", ordinal(n)),
    ])
}

/// Query covering the common release spellings of a part/cour.
pub fn build_part_query(title: &str, part: i32) -> String {
    let base = build_search_query(title);
    if part <= 1 || base.is_empty() {
        return base;
    }
    let n = part as u32;
    let mut variants = vec![format!("{base} Part {n}")];
    if let Some(roman) = to_roman(n) {
        variants.push(format!("{base} Part {roman}"));
    }
    variants.push(format!("{base} {} Cour", ordinal(n)));
    or_group(&variants)
}

fn or_group(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [single] => single.clone(),
        _ => format!("({})", parts.join(" | ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_syntax() {
        assert_eq!(sanitize_query("Re:Zero"), "Re Zero");
        assert_eq!(sanitize_query("(Title) | \"Other\""), "Title Other");
        assert_eq!(sanitize_query("Title - Sub"), "Title Sub");
        assert_eq!(sanitize_query("-excluded word"), "excluded word");
        assert_eq!(sanitize_query("Kaguya-sama"), "Kaguya-sama");
        assert_eq!(sanitize_query("  "), "");
    }

    #[test]
    fn test_sanitize_never_leaves_syntax() {
        let inputs = [
            "((a|b))",
            "\"quoted\" 'single' \u{201C}curly\u{201D}",
            "a[1]{2}~*?^!\\",
            "Frieren: Beyond Journey's End",
            "|||",
        ];
        for input in inputs {
            let out = sanitize_query(input);
            assert!(
                !out.contains(['(', ')', '|', '"', '\'']),
                "{input:?} → {out:?}"
            );
        }
    }

    #[test]
    fn test_search_query() {
        assert_eq!(build_search_query("Shingeki no Kyojin"), "Shingeki Kyojin");
        assert_eq!(build_search_query("Overlord II"), "Overlord");
        assert_eq!(build_search_query("Hunter x Hunter (2011)"), "Hunter x Hunter");
        assert_eq!(build_search_query("The OVA"), "The");
        assert_eq!(build_search_query(""), "");
    }

    #[test]
    fn test_advanced_query() {
        assert_eq!(
            build_advanced_query(&["Overlord", "Frieren"]),
            "(Overlord | Frieren)"
        );
        assert_eq!(build_advanced_query(&["Overlord", "overlord II"]), "Overlord");
        assert_eq!(build_advanced_query(&["", "  "]), "");
        let none: [&str; 0] = [];
        assert_eq!(build_advanced_query(&none), "");
    }

    #[test]
    fn test_season_query_first_season_is_plain() {
        assert_eq!(build_season_query("Naruto", 1), build_search_query("Naruto"));
        assert_eq!(build_season_query("Naruto", 0), "Naruto");
        assert_eq!(build_season_query("Naruto", -1), "Naruto");
    }

    #[test]
    fn test_season_query_alternatives() {
        assert_eq!(
            build_season_query("Overlord", 2),
            "(Overlord S02 | Overlord Season 2 | Overlord 2nd Season)"
        );
        assert_eq!(
            build_season_query("Overlord III", 3),
            "(Overlord S03 | Overlord Season 3 | Overlord 3rd Season)"
        );
    }

    #[test]
    fn test_part_query_alternatives() {
        assert_eq!(
            build_part_query("Re:Zero", 2),
            "(Re Zero Part 2 | Re Zero Part II | Re Zero 2nd Cour)"
        );
        assert_eq!(build_part_query("Re:Zero", 1), "Re Zero");
    }

    #[test]
    fn test_queries_on_blank_title() {
        assert_eq!(build_season_query("", 2), "");
        assert_eq!(build_part_query("", 2), "");
    }
}

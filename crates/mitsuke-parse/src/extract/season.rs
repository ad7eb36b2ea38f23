use std::sync::LazyLock;

use regex::Regex;

use super::numeral::{
    ordinal_word_to_u32, parse_number, parse_number_or_kanji, parse_number_or_roman,
    roman_to_u32,
};
use crate::tokens::is_format_word;

use super::{leftmost, part, preceded_by_counter, scan_all, Marker};

// ── Regex patterns ──────────────────────────────────────────────

/// "Season 2", "Season II", "Saison 3", "Series 2", "season2".
static RE_SEASON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:season|saison|series)[\s\-]*(?P<n>\d{1,3}|[ivx]{1,5})\b").unwrap()
});

/// "S2", "S02", "S01E05".
static RE_S_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bS(?P<n>\d{1,2})(?:E\d{1,4})?\b").unwrap());

/// "2nd Season", "3rd-season".
static RE_NTH_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?P<n>\d{1,2})(?:st|nd|rd|th)[\s\-]*season\b").unwrap());

/// "Second Season".
static RE_WORD_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<n>first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)[\s\-]+season\b",
    )
    .unwrap()
});

/// "Overlord III", "Overlord II: The Dark Warrior", "Title IV - Sub".
/// I and X alone are too ambiguous to count.
static RE_ROMAN_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s(?P<marker>(?P<n>ii|iii|iv|v|vi|vii|viii|ix|xi|xii|xiii))(?:\s*:|\s+-\s|\s*$)",
    )
    .unwrap()
});

/// Japanese/Chinese: "2期", "第2期", "第二期", "第2季".
static RE_CJK_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:第\s*)?(?P<n>\d{1,2}|[一二三四五六七八九十]{1,3})\s*[期季]").unwrap()
});

/// "シーズン2", "2ndシーズン", "2シーズン".
static RE_CJK_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)シーズン\s*(?P<n>\d{1,2})|(?P<n2>\d{1,2})(?:st|nd|rd|th)?\s*シーズン").unwrap()
});

/// Find the season marker in a canonical string.
///
/// Priority: explicit keyword > ordinal > trailing roman numeral > CJK marker >
/// bare trailing number. The bare number is only taken when nothing stronger
/// exists and no part marker already claims it.
pub fn find(text: &str) -> Option<Marker> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(m) = explicit(text) {
        return Some(m);
    }
    if let Some(m) = ordinal(text) {
        return Some(m);
    }

    let claimed = part::markers(text);

    if let Some(m) = roman_suffix(text, &claimed) {
        return Some(m);
    }
    if let Some(m) = cjk(text) {
        return Some(m);
    }
    trailing_number(text, &claimed)
}

/// Every keyword, ordinal and CJK season marker in the string.
///
/// Roman numerals and bare numbers are left out: they only count as
/// markers when [`find`] picks them.
pub fn markers(text: &str) -> Vec<Marker> {
    let mut out: Vec<Marker> = scan_all(&RE_SEASON_WORD, text, parse_season_value)
        .chain(scan_all(&RE_S_PREFIX, text, parse_number))
        .chain(scan_all(&RE_NTH_SEASON, text, parse_number))
        .chain(scan_all(&RE_WORD_SEASON, text, ordinal_word_to_u32))
        .chain(scan_all(&RE_CJK_PERIOD, text, parse_number_or_kanji))
        .chain(cjk_season_all(text))
        .collect();
    out.sort_by_key(|m| m.start);
    out
}

/// "Season N" accepts roman numerals after the keyword, including I and X.
fn parse_season_value(s: &str) -> Option<u32> {
    parse_number_or_roman(s)
}

/// "Season 2", "S02".
fn explicit(text: &str) -> Option<Marker> {
    leftmost([
        scan_all(&RE_SEASON_WORD, text, parse_season_value).next(),
        scan_all(&RE_S_PREFIX, text, parse_number).next(),
    ])
}

/// "2nd Season", "Second Season".
fn ordinal(text: &str) -> Option<Marker> {
    leftmost([
        scan_all(&RE_NTH_SEASON, text, parse_number).next(),
        scan_all(&RE_WORD_SEASON, text, ordinal_word_to_u32).next(),
    ])
}

/// "Overlord III", unless the numeral belongs to "Part III" or "Vol III".
fn roman_suffix(text: &str, claimed: &[Marker]) -> Option<Marker> {
    scan_all(&RE_ROMAN_SUFFIX, text, roman_to_u32)
        .find(|m| !claimed.iter().any(|c| c.overlaps(m)) && !preceded_by_counter(text, m.start))
}

/// "2期", "第二期", "シーズン2".
fn cjk(text: &str) -> Option<Marker> {
    leftmost([
        scan_all(&RE_CJK_PERIOD, text, parse_number_or_kanji).next(),
        cjk_season_all(text).next(),
    ])
}

/// The katakana pattern carries its number in one of two groups.
fn cjk_season_all(text: &str) -> impl Iterator<Item = Marker> + '_ {
    RE_CJK_SEASON.captures_iter(text).filter_map(|caps| {
        let n = caps.name("n").or_else(|| caps.name("n2"))?;
        let whole = caps.get(0)?;
        Some(Marker {
            value: parse_number(n.as_str())?,
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// "Konosuba 2": a one- or two-digit number closing the title.
///
/// Rejected when it is the whole title, is zero-padded or follows a dash
/// separator ("Title 05" and "Title - 05" are episodes), follows a counter
/// word ("Kaiju No. 8") or a format word ("Movie 2"), is zero, or sits inside
/// a part marker.
fn trailing_number(text: &str, claimed: &[Marker]) -> Option<Marker> {
    let trimmed = text.trim_end();
    let (head, last) = trimmed.rsplit_once(' ')?;

    if last.is_empty()
        || last.len() > 2
        || last.starts_with('0')
        || !last.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let head = head.trim_end();
    if head.is_empty() || head.ends_with('-') {
        return None;
    }
    if head.rsplit(' ').next().is_some_and(is_format_word) {
        return None;
    }

    let start = trimmed.len() - last.len();
    let marker = Marker {
        value: parse_number(last)?,
        start,
        end: trimmed.len(),
    };

    if marker.value == 0
        || preceded_by_counter(text, start)
        || claimed.iter().any(|c| c.overlaps(&marker))
    {
        return None;
    }
    Some(marker)
}

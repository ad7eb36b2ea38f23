use std::sync::LazyLock;

use regex::Regex;

use super::numeral::{ordinal_word_to_u32, parse_number, parse_number_or_kanji, roman_to_u32};
use super::{leftmost, scan_all, Marker};

/// "Part 2", "Cour 2", "part2".
static RE_PART_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:part|cour)[\s\-]*(?P<n>\d{1,2})\b").unwrap());

/// "2nd Part", "2nd Cour".
static RE_NTH_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<n>\d{1,2})(?:st|nd|rd|th)[\s\-]*(?:part|cour)\b").unwrap()
});

/// "Second Part", "Second Cour".
static RE_WORD_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<n>first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)[\s\-]+(?:part|cour)\b",
    )
    .unwrap()
});

/// "Part II". I and X are skipped, they read as words too often.
static RE_ROMAN_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:part|cour)\s+(?P<n>ii|iii|iv|v|vi|vii|viii|ix)\b").unwrap()
});

/// "第2クール", "第二部", "2クール".
static RE_CJK_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:第\s*)?(?P<n>\d{1,2}|[一二三四五六七八九十]{1,3})\s*(?:クール|部)").unwrap()
});

/// "前編" (first half), "後編" (second half).
static RE_CJK_HALF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?P<n>前編|後編)").unwrap());

/// Find the part/cour marker in a canonical string.
///
/// Priority: explicit keyword > ordinal > roman numeral > CJK marker.
/// Season markers are never consulted, so "Season 2 Part 2" yields a part too.
pub fn find(text: &str) -> Option<Marker> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(m) = scan_all(&RE_PART_WORD, text, parse_number).next() {
        return Some(m);
    }
    if let Some(m) = leftmost([
        scan_all(&RE_NTH_PART, text, parse_number).next(),
        scan_all(&RE_WORD_PART, text, ordinal_word_to_u32).next(),
    ]) {
        return Some(m);
    }
    if let Some(m) = scan_all(&RE_ROMAN_PART, text, roman_to_u32).next() {
        return Some(m);
    }
    leftmost([
        scan_all(&RE_CJK_PART, text, parse_number_or_kanji).next(),
        scan_all(&RE_CJK_HALF, text, half_value).next(),
    ])
}

/// Every part marker in the string, in order of appearance.
pub fn markers(text: &str) -> Vec<Marker> {
    let mut out: Vec<Marker> = scan_all(&RE_PART_WORD, text, parse_number)
        .chain(scan_all(&RE_NTH_PART, text, parse_number))
        .chain(scan_all(&RE_WORD_PART, text, ordinal_word_to_u32))
        .chain(scan_all(&RE_ROMAN_PART, text, roman_to_u32))
        .chain(scan_all(&RE_CJK_PART, text, parse_number_or_kanji))
        .chain(scan_all(&RE_CJK_HALF, text, half_value))
        .collect();
    out.sort_by_key(|m| m.start);
    out
}

fn half_value(s: &str) -> Option<u32> {
    match s {
        "前編" => Some(1),
        "後編" => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(text: &str) -> Option<u32> {
        find(text).map(|m| m.value)
    }

    #[test]
    fn test_part_word() {
        assert_eq!(part("Re:Zero Part 2"), Some(2));
        assert_eq!(part("Title Cour 2"), Some(2));
        assert_eq!(part("Title part2"), Some(2));
    }

    #[test]
    fn test_ordinal_part() {
        assert_eq!(part("Re:Zero 2nd Cour"), Some(2));
        assert_eq!(part("Title 3rd Part"), Some(3));
        assert_eq!(part("Title Second Cour"), Some(2));
    }

    #[test]
    fn test_roman_part() {
        assert_eq!(part("JoJo Part III"), Some(3));
        assert_eq!(part("Title Part II"), Some(2));
        assert_eq!(part("Title Part I"), None);
    }

    #[test]
    fn test_cjk_part() {
        assert_eq!(part("呪術廻戦 第2クール"), Some(2));
        assert_eq!(part("ジョジョ 第三部"), Some(3));
        assert_eq!(part("劇場版 後編"), Some(2));
        assert_eq!(part("劇場版 前編"), Some(1));
    }

    #[test]
    fn test_part_alongside_season() {
        assert_eq!(part("Title Season 2 Part 2"), Some(2));
        assert_eq!(part("Shingeki no Kyojin The Final Season Part 2"), Some(2));
    }

    #[test]
    fn test_season_is_not_part() {
        assert_eq!(part("Title 2nd Season"), None);
        assert_eq!(part("Re:Zero"), None);
        assert_eq!(part("Konosuba 2"), None);
    }

    #[test]
    fn test_markers_span() {
        let text = "Title Part 2 2nd Cour";
        let found = markers(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw(text), "Part 2");
        assert_eq!(found[1].raw(text), "2nd Cour");
    }
}

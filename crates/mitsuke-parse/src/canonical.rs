//! Canonical form for human-entered titles and scraped release names.
//!
//! Transforms a string through sequential levels so that romanization and
//! punctuation variants of the same title line up. Case is preserved: the
//! canonical form is still fit for display and for indexer queries, and the
//! comparison code lowercases on its own.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Apply the full canonicalization pipeline.
///
/// Levels applied in order:
/// 1. Compatibility folding + diacritic removal on Latin letters
/// 2. Character transliteration, then a second fold for marks left on the
///    letters it produced ("m@\u{301}" → "ma")
/// 3. Separator unification
/// 4. Possessive stripping
/// 5. Whitespace collapse
///
/// The pipeline is idempotent: `canonicalize(&canonicalize(x)) == canonicalize(x)`.
pub fn canonicalize(s: &str) -> String {
    let s = fold_unicode(s);
    let s = fold_unicode(&transliterate(&s));
    let s = unify_separators(&s);
    let s = strip_possessives(&s);
    collapse_whitespace(&s)
}

// ── Level 1: Compatibility folding ────────────────────────────────────

/// NFKD (fullwidth → ASCII, split diacritics), drop combining marks that sit
/// on Latin letters, then recompose. Marks on kana stay, so "プ" survives.
fn fold_unicode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut latin_base = false;

    for c in s.nfkd() {
        if is_combining_mark(c) {
            if !latin_base {
                result.push(c);
            }
            continue;
        }
        latin_base = is_latin(c);
        result.push(c);
    }

    result.nfc().collect()
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&c)
}

// ── Level 2: Character transliteration ────────────────────────────────

/// Replace common character substitutions used in anime titles.
fn transliterate(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '@' => result.push('a'),
            '0' if looks_like_letter_o(&chars, i) => result.push('o'),
            '\u{00D7}' | '\u{2715}' | '\u{2716}' => result.push_str(" x "), // ×, ✕, ✖
            '\u{2019}' | '\u{2018}' | '\u{02BC}' | '`' => result.push('\''),
            '\u{201C}' | '\u{201D}' => result.push('"'),
            '\u{2010}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => result.push('-'),
            '\u{A789}' => result.push(':'), // modifier letter colon
            '\u{2026}' => result.push_str("..."),
            '\u{00E6}' => result.push_str("ae"),
            '\u{00C6}' => result.push_str("AE"),
            '\u{0153}' => result.push_str("oe"),
            '\u{0152}' => result.push_str("OE"),
            '\u{00F8}' => result.push('o'),
            '\u{00D8}' => result.push('O'),
            '\u{0142}' => result.push('l'),
            '\u{0141}' => result.push('L'),
            '\u{0111}' | '\u{00F0}' => result.push('d'),
            '\u{00FE}' => result.push_str("th"),
            '\u{00DF}' => result.push_str("ss"),
            c => result.push(c),
        }
    }

    result
}

/// Heuristic: '0' looks like letter 'O' if surrounded by letters (not digits).
/// e.g., "Danganr0npa" → "Danganronpa"
fn looks_like_letter_o(chars: &[char], pos: usize) -> bool {
    let before = pos > 0 && chars[pos - 1].is_alphabetic();
    let after = pos + 1 < chars.len() && chars[pos + 1].is_alphabetic();
    before && after
}

// ── Level 3: Separators ───────────────────────────────────────────────

/// Underscores and dots become spaces; a run of dashes becomes one hyphen.
///
/// A lone hyphen between spaces survives as the subtitle separator
/// ("Shingeki no Kyojin - The Final Season").
fn unify_separators(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_dash = false;

    for c in s.chars() {
        match c {
            '_' | '.' => {
                result.push(' ');
                prev_dash = false;
            }
            '-' => {
                if !prev_dash {
                    result.push('-');
                }
                prev_dash = true;
            }
            c => {
                result.push(c);
                prev_dash = false;
            }
        }
    }

    result
}

// ── Level 4: Possessives ──────────────────────────────────────────────

/// A word character followed by one or more `'s` at a word end.
static RE_POSSESSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w)(?:'s)+\b").unwrap());

/// "Frieren: Beyond Journey's End" → "Frieren: Beyond Journey End".
fn strip_possessives(s: &str) -> String {
    RE_POSSESSIVE.replace_all(s, "${1}").into_owned()
}

// ── Level 5: Whitespace collapse ──────────────────────────────────────

/// Trim and collapse whitespace runs; drop dashes dangling at either end.
fn collapse_whitespace(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c == '-' || c == ' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Level 1 ───────────────────────────────────────────────────────

    #[test]
    fn macrons_fold_to_base_letters() {
        assert_eq!(fold_unicode("Shōnen Kūki"), "Shonen Kuki");
        assert_eq!(fold_unicode("Gekijō-ban"), "Gekijo-ban");
    }

    #[test]
    fn fullwidth_ascii() {
        assert_eq!(fold_unicode("ＦＵＬＬＷＩＤＴＨ ２"), "FULLWIDTH 2");
    }

    #[test]
    fn kana_marks_survive() {
        assert_eq!(fold_unicode("フリーレン"), "フリーレン");
        assert_eq!(fold_unicode("プリキュア"), "プリキュア");
    }

    #[test]
    fn accents_fold() {
        assert_eq!(fold_unicode("Café Pokémon"), "Cafe Pokemon");
    }

    // ── Level 2 ───────────────────────────────────────────────────────

    #[test]
    fn at_sign_to_a() {
        assert_eq!(transliterate("THE iDOLM@STER"), "THE iDOLMaSTER");
    }

    #[test]
    fn zero_as_letter_o() {
        assert_eq!(transliterate("Danganr0npa"), "Danganronpa");
        assert_eq!(transliterate("Season 10"), "Season 10");
    }

    #[test]
    fn multiplication_sign() {
        assert_eq!(transliterate("Hunter×Hunter"), "Hunter x Hunter");
    }

    #[test]
    fn ligatures_and_dashes() {
        assert_eq!(transliterate("æther"), "aether");
        assert_eq!(transliterate("Title\u{2014}Sub"), "Title-Sub");
        assert_eq!(transliterate("Straße"), "Strasse");
    }

    // ── Level 3 ───────────────────────────────────────────────────────

    #[test]
    fn underscores_and_dots() {
        assert_eq!(unify_separators("Sousou_no.Frieren"), "Sousou no Frieren");
    }

    #[test]
    fn dash_runs() {
        assert_eq!(unify_separators("Title -- Sub"), "Title - Sub");
        assert_eq!(unify_separators("Kaguya-sama"), "Kaguya-sama");
    }

    // ── Level 4 ───────────────────────────────────────────────────────

    #[test]
    fn possessive_stripped() {
        assert_eq!(strip_possessives("Journey's End"), "Journey End");
        assert_eq!(strip_possessives("KINO'S JOURNEY"), "KINO JOURNEY");
    }

    #[test]
    fn lone_apostrophe_kept() {
        assert_eq!(strip_possessives("rock 'n' roll"), "rock 'n' roll");
    }

    // ── Full pipeline ─────────────────────────────────────────────────

    #[test]
    fn full_pipeline_release_name() {
        assert_eq!(
            canonicalize("Sousou_no_Frieren__S01E05.1080p"),
            "Sousou no Frieren S01E05 1080p"
        );
    }

    #[test]
    fn full_pipeline_curly_possessive() {
        assert_eq!(
            canonicalize("Frieren: Beyond Journey\u{2019}s End"),
            "Frieren: Beyond Journey End"
        );
    }

    #[test]
    fn full_pipeline_keeps_case_and_colon() {
        assert_eq!(canonicalize("  Re:Zero  "), "Re:Zero");
    }

    #[test]
    fn full_pipeline_possessive_before_underscore() {
        assert_eq!(canonicalize("Kino's_Journey"), "Kino Journey");
    }

    #[test]
    fn full_pipeline_mark_on_transliterated_letter() {
        assert_eq!(canonicalize("Idolm@\u{301}ster"), "Idolmaster");
        assert_eq!(canonicalize("Ａ＠\u{301}"), "Aa");
    }

    #[test]
    fn full_pipeline_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   \t "), "");
    }

    #[test]
    fn full_pipeline_trailing_dash() {
        assert_eq!(canonicalize("Title - "), "Title");
    }

    #[test]
    fn idempotent_on_samples() {
        let samples = [
            "Shingeki no Kyojin - The Final Season",
            "Kimetsu_no_Yaiba.Yuukaku-hen",
            "Frieren: Beyond Journey's End",
            "a's's",
            "Hunter×Hunter (2011)",
            "ＲＥ：ゼロ 第２期",
            "Title--—Sub",
            "--- - ---",
            "Ōkami-san & Her Seven Companions",
            "Boku no Hero Academia 5th Season",
            "Idolm@\u{301}ster",
            "Ａ＠\u{301}",
            "",
        ];
        for s in samples {
            let once = canonicalize(s);
            assert_eq!(canonicalize(&once), once, "not idempotent for {s:?}");
        }
    }
}

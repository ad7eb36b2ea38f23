//! Tokenizer and noise filter.

use crate::keyword::{self, NoiseKind};
use crate::title::NormalizedTitle;

/// A word with leading/trailing punctuation removed ("Titan:" → "Titan").
pub fn word_core(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whether a whitespace-separated word is noise.
pub fn is_noise(word: &str) -> bool {
    keyword::is_noise_word(word_core(word))
}

/// Whether a word names a media format ("OVA", "Movie:").
pub(crate) fn is_format_word(word: &str) -> bool {
    matches!(keyword::lookup(word_core(word)), Some(NoiseKind::Format(_)))
}

pub(crate) fn is_stopword(word: &str) -> bool {
    keyword::lookup(word_core(word)) == Some(NoiseKind::Stopword)
}

/// Words of `text` that are not noise, in order.
///
/// Punctuation attached to a kept word stays ("Titan:"), so the result is
/// still readable and can be split on its subtitle separator.
pub fn denoise(text: &str) -> Vec<&str> {
    text.split_whitespace().filter(|w| !is_noise(w)).collect()
}

/// Lowercased significant tokens of an already denoised string.
///
/// Words split further on inner punctuation ("re:zero" → "re", "zero").
/// Noise, single Latin letters and punctuation remnants are dropped; order
/// and duplicates are kept.
pub fn significant_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|w| !is_noise(w))
        .flat_map(|w| w.split(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .filter(|t| !is_single_letter(t))
        .filter(|t| !keyword::is_noise_word(t))
        .map(str::to_lowercase)
        .collect()
}

fn is_single_letter(t: &str) -> bool {
    let mut chars = t.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Significant tokens of a raw title, through the full normalization pipeline.
pub fn get_significant_tokens(title: &str) -> Vec<String> {
    NormalizedTitle::new(title).tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_core() {
        assert_eq!(word_core("Titan:"), "Titan");
        assert_eq!(word_core("(TV)"), "TV");
        assert_eq!(word_core("--"), "");
    }

    #[test]
    fn test_denoise_keeps_punctuation() {
        assert_eq!(
            denoise("Attack on Titan: The Final"),
            vec!["Attack", "Titan:", "Final"]
        );
    }

    #[test]
    fn test_significant_tokens() {
        assert_eq!(
            significant_tokens("Shingeki no Kyojin"),
            vec!["shingeki", "kyojin"]
        );
        assert_eq!(significant_tokens("Re:Zero"), vec!["re", "zero"]);
        assert_eq!(significant_tokens("Spy x Family"), vec!["spy", "family"]);
    }

    #[test]
    fn test_significant_tokens_keep_numbers_and_duplicates() {
        assert_eq!(significant_tokens("Kaiju 8"), vec!["kaiju", "8"]);
        assert_eq!(
            significant_tokens("Hunter Hunter"),
            vec!["hunter", "hunter"]
        );
    }

    #[test]
    fn test_significant_tokens_drop_release_tags() {
        assert_eq!(
            significant_tokens("Frieren 1080p WEB-DL x265 mkv"),
            vec!["frieren"]
        );
    }

    #[test]
    fn test_cjk_tokens() {
        assert_eq!(significant_tokens("進撃の巨人"), vec!["進撃の巨人"]);
    }

    #[test]
    fn test_get_significant_tokens_pipeline() {
        assert_eq!(
            get_significant_tokens("Overlord Season 2"),
            vec!["overlord"]
        );
        assert!(get_significant_tokens("").is_empty());
        assert!(get_significant_tokens("The OVA").is_empty());
    }
}

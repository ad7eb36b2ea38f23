use phf::phf_map;

use crate::format::MediaFormat;

/// Why a word carries no series-identifying information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// English articles, prepositions and copulas.
    Stopword,
    /// Romanized Japanese particles ("no", "wa", ...).
    Particle,
    /// Media format words; these also come out of the clean base title.
    Format(MediaFormat),
    /// Generic anime vocabulary that says nothing about which series.
    Generic,
    /// Season/part keywords left over once their number is gone.
    Marker,
    /// Resolution, codec, source and container tags in release names.
    ReleaseTag,
}

/// Compile-time noise table.
/// All keys are UPPERCASE for case-insensitive matching.
pub static NOISE_WORDS: phf::Map<&'static str, NoiseKind> = phf_map! {
    // ── Stopwords ────────────────────────────────────────────────
    "THE" => NoiseKind::Stopword,
    "A" => NoiseKind::Stopword,
    "AN" => NoiseKind::Stopword,
    "OF" => NoiseKind::Stopword,
    "TO" => NoiseKind::Stopword,
    "IN" => NoiseKind::Stopword,
    "FOR" => NoiseKind::Stopword,
    "ON" => NoiseKind::Stopword,
    "WITH" => NoiseKind::Stopword,
    "AT" => NoiseKind::Stopword,
    "BY" => NoiseKind::Stopword,
    "FROM" => NoiseKind::Stopword,
    "AS" => NoiseKind::Stopword,
    "IS" => NoiseKind::Stopword,
    "IT" => NoiseKind::Stopword,
    "THAT" => NoiseKind::Stopword,
    "THIS" => NoiseKind::Stopword,
    "BE" => NoiseKind::Stopword,
    "ARE" => NoiseKind::Stopword,
    "WAS" => NoiseKind::Stopword,
    "WERE" => NoiseKind::Stopword,

    // ── Japanese particles ───────────────────────────────────────
    "NO" => NoiseKind::Particle,
    "WA" => NoiseKind::Particle,
    "WO" => NoiseKind::Particle,
    "GA" => NoiseKind::Particle,
    "NI" => NoiseKind::Particle,
    "DE" => NoiseKind::Particle,
    "KA" => NoiseKind::Particle,
    "MO" => NoiseKind::Particle,
    "YA" => NoiseKind::Particle,
    "E" => NoiseKind::Particle,
    "HE" => NoiseKind::Particle,

    // ── Formats ──────────────────────────────────────────────────
    "TV" => NoiseKind::Format(MediaFormat::Tv),
    "ONA" => NoiseKind::Format(MediaFormat::Tv),
    "OVA" => NoiseKind::Format(MediaFormat::Ova),
    "OAD" => NoiseKind::Format(MediaFormat::Ova),
    "OAV" => NoiseKind::Format(MediaFormat::Ova),
    "SP" => NoiseKind::Format(MediaFormat::Special),
    "SPECIAL" => NoiseKind::Format(MediaFormat::Special),
    "SPECIALS" => NoiseKind::Format(MediaFormat::Special),
    "EXTRAS" => NoiseKind::Format(MediaFormat::Special),
    "PREVIEW" => NoiseKind::Format(MediaFormat::Special),
    "FINALE" => NoiseKind::Format(MediaFormat::Special),
    "MOVIE" => NoiseKind::Format(MediaFormat::Movie),
    "FILM" => NoiseKind::Format(MediaFormat::Movie),
    "GEKIJOUBAN" => NoiseKind::Format(MediaFormat::Movie),
    "GEKIJOBAN" => NoiseKind::Format(MediaFormat::Movie),
    "GEKIJYOUBAN" => NoiseKind::Format(MediaFormat::Movie),
    "NC" => NoiseKind::Format(MediaFormat::Creditless),
    "NCOP" => NoiseKind::Format(MediaFormat::Creditless),
    "NCED" => NoiseKind::Format(MediaFormat::Creditless),
    "OPENING" => NoiseKind::Format(MediaFormat::Creditless),
    "ENDING" => NoiseKind::Format(MediaFormat::Creditless),

    // ── Generic ──────────────────────────────────────────────────
    "ANIME" => NoiseKind::Generic,
    "UNCENSORED" => NoiseKind::Generic,
    "CENSORED" => NoiseKind::Generic,

    // ── Markers ──────────────────────────────────────────────────
    "SEASON" => NoiseKind::Marker,
    "PART" => NoiseKind::Marker,
    "COUR" => NoiseKind::Marker,

    // ── Release tags ─────────────────────────────────────────────
    "480P" => NoiseKind::ReleaseTag,
    "720P" => NoiseKind::ReleaseTag,
    "1080P" => NoiseKind::ReleaseTag,
    "2160P" => NoiseKind::ReleaseTag,
    "4K" => NoiseKind::ReleaseTag,
    "X264" => NoiseKind::ReleaseTag,
    "X265" => NoiseKind::ReleaseTag,
    "H264" => NoiseKind::ReleaseTag,
    "H265" => NoiseKind::ReleaseTag,
    "HEVC" => NoiseKind::ReleaseTag,
    "AVC" => NoiseKind::ReleaseTag,
    "AV1" => NoiseKind::ReleaseTag,
    "10BIT" => NoiseKind::ReleaseTag,
    "HI10P" => NoiseKind::ReleaseTag,
    "WEB" => NoiseKind::ReleaseTag,
    "WEBRIP" => NoiseKind::ReleaseTag,
    "WEB-DL" => NoiseKind::ReleaseTag,
    "WEB-RIP" => NoiseKind::ReleaseTag,
    "BD" => NoiseKind::ReleaseTag,
    "BDRIP" => NoiseKind::ReleaseTag,
    "BLURAY" => NoiseKind::ReleaseTag,
    "BLU-RAY" => NoiseKind::ReleaseTag,
    "DVD" => NoiseKind::ReleaseTag,
    "DVDRIP" => NoiseKind::ReleaseTag,
    "REMUX" => NoiseKind::ReleaseTag,
    "FLAC" => NoiseKind::ReleaseTag,
    "AAC" => NoiseKind::ReleaseTag,
    "OPUS" => NoiseKind::ReleaseTag,
    "AC3" => NoiseKind::ReleaseTag,
    "MKV" => NoiseKind::ReleaseTag,
    "MP4" => NoiseKind::ReleaseTag,
    "AVI" => NoiseKind::ReleaseTag,
    "BATCH" => NoiseKind::ReleaseTag,
    "DUAL-AUDIO" => NoiseKind::ReleaseTag,
    "MULTI-SUB" => NoiseKind::ReleaseTag,
    "DUB" => NoiseKind::ReleaseTag,
    "DUBBED" => NoiseKind::ReleaseTag,
    "SUB" => NoiseKind::ReleaseTag,
    "SUBBED" => NoiseKind::ReleaseTag,
    "RAW" => NoiseKind::ReleaseTag,
    "CR" => NoiseKind::ReleaseTag,
    "AMZN" => NoiseKind::ReleaseTag,
    "NF" => NoiseKind::ReleaseTag,
};

/// Look up a noise word (case-insensitive).
pub fn lookup(s: &str) -> Option<NoiseKind> {
    NOISE_WORDS.get(s.to_uppercase().as_str()).copied()
}

/// Whether `s` is any kind of noise word.
pub fn is_noise_word(s: &str) -> bool {
    lookup(s).is_some()
}

/// The media format a word names, if it is a format word.
pub fn format_of(s: &str) -> Option<MediaFormat> {
    match lookup(s)? {
        NoiseKind::Format(format) => Some(format),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(lookup("the"), Some(NoiseKind::Stopword));
        assert_eq!(lookup("The"), Some(NoiseKind::Stopword));
        assert_eq!(lookup("no"), Some(NoiseKind::Particle));
        assert_eq!(lookup("1080p"), Some(NoiseKind::ReleaseTag));
        assert_eq!(lookup("Web-DL"), Some(NoiseKind::ReleaseTag));
    }

    #[test]
    fn test_format_words() {
        assert_eq!(format_of("OVA"), Some(MediaFormat::Ova));
        assert_eq!(format_of("movie"), Some(MediaFormat::Movie));
        assert_eq!(format_of("NCOP"), Some(MediaFormat::Creditless));
        assert_eq!(format_of("anime"), None);
    }

    #[test]
    fn test_title_words_are_not_noise() {
        assert!(!is_noise_word("Overlord"));
        assert!(!is_noise_word("Frieren"));
        assert!(!is_noise_word("zero"));
        assert!(!is_noise_word(""));
    }
}

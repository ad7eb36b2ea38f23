use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize;

/// Broad release format of a title or release name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Tv,
    Ova,
    Special,
    Movie,
    /// Creditless openings/endings.
    Creditless,
}

impl MediaFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tv => "tv",
            Self::Ova => "ova",
            Self::Special => "special",
            Self::Movie => "movie",
            Self::Creditless => "creditless",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static RE_CREDITLESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:NCOP|NCED|NC)\s*\d*\b").unwrap());

/// Also matches a number glued in front ("12OVA").
static RE_OVA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\b|\d)(?:OVA|OAD|OAV)\s*\d*\b").unwrap());

static RE_SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:SP|Specials?)\s*\d*\b").unwrap());

static RE_MOVIE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Movie|Film|Gekijou?-?ban|Gekijyou-?ban)\b|劇場版").unwrap()
});

/// Classify a title or release name.
///
/// Checked in order: creditless, OVA, special, movie. Anything else is TV.
pub fn detect_format(title: &str) -> MediaFormat {
    let text = canonicalize(title);
    if RE_CREDITLESS.is_match(&text) {
        MediaFormat::Creditless
    } else if RE_OVA.is_match(&text) {
        MediaFormat::Ova
    } else if RE_SPECIAL.is_match(&text) {
        MediaFormat::Special
    } else if RE_MOVIE.is_match(&text) {
        MediaFormat::Movie
    } else {
        MediaFormat::Tv
    }
}

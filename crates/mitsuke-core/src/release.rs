//! Decide whether a scraped release belongs to a library entry.

use std::fmt;
use std::sync::LazyLock;

use mitsuke_parse::{
    build_smart_search_titles, detect_format, find_best_match_scored, MediaFormat,
    NormalizedTitle,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{MatchRules, MatcherConfig};

/// "[SubsPlease]", "(1080p)", "{v2}".
static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)|\{[^}]*\}|【[^】]*】").unwrap());

static RE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:mkv|mp4|avi|webm|m4v|ts|wmv|torrent)\s*$").unwrap()
});

/// " - 05", " - 12v2 END" and everything after.
static RE_DASH_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+-\s+\d{1,4}(?:v\d+)?(?:\s.*)?$").unwrap());

/// "12 END", "24v2 Final" closing the name.
static RE_TRAILING_FINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+\d{1,4}(?:v\d+)?\s+(?:end|final)\s*$").unwrap());

/// Standalone "E05", "EP05", "Ep.12". "S01E05" keeps its season.
static RE_EPISODE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bE(?:P\.?\s?)?\d{1,4}(?:v\d+)?\b").unwrap());

/// Known titles of one library entry, in confidence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTitles {
    pub titles: Vec<String>,
    pub season: Option<u32>,
    pub part: Option<u32>,
}

impl LibraryTitles {
    /// Entry whose season/part are taken from the first title naming one.
    pub fn new<S: AsRef<str>>(titles: &[S]) -> Self {
        let resolved = build_smart_search_titles(titles);
        Self {
            titles: titles.iter().map(|t| t.as_ref().to_string()).collect(),
            season: u32::try_from(resolved.season).ok(),
            part: u32::try_from(resolved.part).ok(),
        }
    }

    pub fn with_season(mut self, season: Option<u32>) -> Self {
        self.season = season;
        self
    }

    pub fn with_part(mut self, part: Option<u32>) -> Self {
        self.part = part;
        self
    }
}

/// Why a release was turned down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    LowRatio { ratio: f64, min_ratio: f64 },
    SeasonMismatch { expected: u32, found: Option<u32> },
    PartMismatch { expected: u32, found: u32 },
    Format { format: MediaFormat },
    NoTitles,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowRatio { ratio, min_ratio } => {
                write!(f, "ratio {ratio:.2} below {min_ratio:.2}")
            }
            Self::SeasonMismatch {
                expected,
                found: Some(found),
            } => write!(f, "season {found}, expected {expected}"),
            Self::SeasonMismatch {
                expected,
                found: None,
            } => write!(f, "no season, expected {expected}"),
            Self::PartMismatch { expected, found } => {
                write!(f, "part {found}, expected {expected}")
            }
            Self::Format { format } => write!(f, "format {format} not allowed"),
            Self::NoTitles => write!(f, "entry has no titles"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum MatchVerdict {
    Accepted {
        ratio: f64,
        matched_title: String,
        season: Option<u32>,
        part: Option<u32>,
    },
    Rejected {
        reason: RejectReason,
    },
}

impl MatchVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Accepted { ratio, .. } => Some(*ratio),
            Self::Rejected { .. } => None,
        }
    }
}

/// Scores release names against library entries under a set of [`MatchRules`].
#[derive(Debug, Clone)]
pub struct ReleaseMatcher {
    rules: MatchRules,
}

impl ReleaseMatcher {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            rules: config.matcher.clone(),
        }
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn evaluate(&self, entry: &LibraryTitles, release: &str) -> MatchVerdict {
        let verdict = self.judge(entry, release);
        match &verdict {
            MatchVerdict::Accepted { ratio, matched_title, .. } => {
                tracing::debug!(release, ratio, matched = %matched_title, "release accepted");
            }
            MatchVerdict::Rejected { reason } => {
                tracing::debug!(release, %reason, "release rejected");
            }
        }
        verdict
    }

    fn judge(&self, entry: &LibraryTitles, release: &str) -> MatchVerdict {
        let title = release_title(release);
        let record = NormalizedTitle::new(&title);

        let Some(best) = find_best_match_scored(&title, &entry.titles) else {
            return reject(RejectReason::NoTitles);
        };
        if best.score < self.rules.min_ratio {
            return reject(RejectReason::LowRatio {
                ratio: best.score,
                min_ratio: self.rules.min_ratio,
            });
        }

        let season = u32::try_from(record.season).ok();
        let part = u32::try_from(record.part).ok();

        if self.rules.strict_season {
            if let Some(expected) = entry.season {
                let ok = match season {
                    Some(found) => found == expected,
                    None => expected <= 1,
                };
                if !ok {
                    return reject(RejectReason::SeasonMismatch {
                        expected,
                        found: season,
                    });
                }
            }
        }

        if self.rules.strict_part {
            if let (Some(expected), Some(found)) = (entry.part, part) {
                if expected != found {
                    return reject(RejectReason::PartMismatch { expected, found });
                }
            }
        }

        let format = detect_format(&title);
        if !self.rules.allowed_formats.contains(&format) {
            return reject(RejectReason::Format { format });
        }

        MatchVerdict::Accepted {
            ratio: best.score,
            matched_title: best.candidate.to_string(),
            season,
            part,
        }
    }

    /// The accepted release with the highest ratio; the first one wins ties.
    pub fn best_release<'a, S: AsRef<str>>(
        &self,
        entry: &LibraryTitles,
        releases: &'a [S],
    ) -> Option<(&'a str, MatchVerdict)> {
        let mut best: Option<(&'a str, MatchVerdict)> = None;
        for release in releases.iter().map(|r| r.as_ref()) {
            let verdict = self.evaluate(entry, release);
            let Some(ratio) = verdict.ratio() else {
                continue;
            };
            if best
                .as_ref()
                .and_then(|(_, v)| v.ratio())
                .map_or(true, |current| ratio > current)
            {
                best = Some((release, verdict));
            }
        }
        best
    }
}

fn reject(reason: RejectReason) -> MatchVerdict {
    MatchVerdict::Rejected { reason }
}

/// The title part of a release name: no group/tag brackets, no extension,
/// no episode number.
pub fn release_title(release: &str) -> String {
    let s = RE_EXTENSION.replace(release, "");
    let s = RE_BRACKETED.replace_all(&s, " ");
    let s = RE_DASH_EPISODE.replace(s.trim(), "");
    let s = RE_TRAILING_FINAL.replace(&s, "");
    let s = RE_EPISODE_TAG.replace_all(&s, " ");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

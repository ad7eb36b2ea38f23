//! Similarity between titles.
//!
//! Titles are compared on their significant-token sets. Each token weighs its
//! character count, so long distinctive words dominate short generic ones;
//! all-digit tokens weigh half since numbers are shared by unrelated series.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::title::NormalizedTitle;

/// Winner of a best-match search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestMatch<'a> {
    pub index: usize,
    pub candidate: &'a str,
    pub score: f64,
}

/// Weighted similarity of two raw titles in `[0.0, 1.0]`.
///
/// `1.0` iff both reduce to the same significant-token set, `0.0` if they share
/// none or either has no significant tokens.
pub fn compare_titles(a: &str, b: &str) -> f64 {
    weighted_ratio(&NormalizedTitle::new(a).tokens, &NormalizedTitle::new(b).tokens)
}

/// Weighted Jaccard ratio over two token lists (duplicates collapse).
pub fn weighted_ratio<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let a = token_set(a);
    let b = token_set(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // BTreeSet iteration keeps the float sums order-independent of argument order.
    let shared: f64 = a.intersection(&b).map(|t| token_weight(t)).sum();
    let union: f64 = a.union(&b).map(|t| token_weight(t)).sum();

    if union <= 0.0 {
        return 0.0;
    }
    (shared / union).clamp(0.0, 1.0)
}

fn strs<S: AsRef<str>>(tokens: &[S]) -> impl Iterator<Item = &str> {
    tokens.iter().map(|t| t.as_ref())
}

fn token_set<S: AsRef<str>>(tokens: &[S]) -> BTreeSet<&str> {
    strs(tokens).filter(|t| !t.is_empty()).collect()
}

fn token_weight(token: &str) -> f64 {
    let len = token.chars().count() as f64;
    if is_numeric(token) {
        len / 2.0
    } else {
        len
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// The candidate scoring highest against `target`; the first one wins ties.
///
/// `None` only for an empty candidate list.
pub fn find_best_match<'a, S: AsRef<str>>(target: &str, candidates: &'a [S]) -> Option<&'a str> {
    find_best_match_scored(target, candidates).map(|m| m.candidate)
}

/// Like [`find_best_match`], also reporting the winner's index and score.
pub fn find_best_match_scored<'a, S: AsRef<str>>(
    target: &str,
    candidates: &'a [S],
) -> Option<BestMatch<'a>> {
    let target_tokens = NormalizedTitle::new(target).tokens;
    let mut best: Option<BestMatch<'a>> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let score = weighted_ratio(&target_tokens, &NormalizedTitle::new(candidate).tokens);
        if best.map_or(true, |b| score > b.score) {
            best = Some(BestMatch {
                index,
                candidate,
                score,
            });
        }
    }

    if let Some(b) = &best {
        tracing::trace!(query = target, candidate = b.candidate, score = b.score, "best match");
    }
    best
}

/// Matches divided by the smaller token list; lenient when one title is a
/// subset of the other.
pub fn token_match_ratio<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_b = token_set(b);
    let matches = strs(a).filter(|t| set_b.contains(t)).count();
    (matches as f64 / a.len().min(b.len()) as f64).clamp(0.0, 1.0)
}

/// Whether every token of `subset` appears in `superset`. An empty subset
/// is always contained.
pub fn contains_all_tokens<S: AsRef<str>>(subset: &[S], superset: &[S]) -> bool {
    if subset.is_empty() {
        return true;
    }
    let set = token_set(superset);
    strs(subset).all(|t| set.contains(t))
}

/// Whether the lists share a token that is neither numeric nor noise.
pub fn has_strong_match<S: AsRef<str>>(a: &[S], b: &[S]) -> bool {
    let set_b = token_set(b);
    strs(a)
        .filter(|t| !is_numeric(t) && !crate::keyword::is_noise_word(t))
        .any(|t| set_b.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "Overlord",
        "Overlord II",
        "Overlord Season 2",
        "Sousou no Frieren",
        "Frieren: Beyond Journey's End",
        "Shingeki no Kyojin Season 3 Part 2",
        "Attack on Titan: Final Season",
        "Mob Psycho 100",
        "Hunter x Hunter (2011)",
        "進撃の巨人 第2期",
        "",
        "The",
    ];

    #[test]
    fn test_identity() {
        for s in SAMPLES {
            if NormalizedTitle::new(s).tokens.is_empty() {
                continue;
            }
            assert_eq!(compare_titles(s, s), 1.0, "identity failed for {s:?}");
        }
    }

    #[test]
    fn test_symmetry_and_bounds() {
        for a in SAMPLES {
            for b in SAMPLES {
                let ab = compare_titles(a, b);
                let ba = compare_titles(b, a);
                assert_eq!(ab, ba, "asymmetric for {a:?} / {b:?}");
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_markers_do_not_count() {
        assert_eq!(compare_titles("Overlord", "Overlord Season 2"), 1.0);
        assert_eq!(compare_titles("Overlord S02", "Overlord III"), 1.0);
    }

    #[test]
    fn test_disjoint_and_empty() {
        assert_eq!(compare_titles("Overlord", "Frieren"), 0.0);
        assert_eq!(compare_titles("", "Overlord"), 0.0);
        assert_eq!(compare_titles("The", "The"), 0.0);
    }

    #[test]
    fn test_long_tokens_weigh_more() {
        let a = ["frieren", "end"];
        let b = ["frieren"];
        let c = ["end"];
        assert!(weighted_ratio(&a, &b) > weighted_ratio(&a, &c));
        assert!((weighted_ratio(&a, &b) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_numbers_weigh_half() {
        let a = ["mob", "psycho", "100"];
        let b = ["mob", "psycho"];
        assert!((weighted_ratio(&a, &b) - 9.0 / 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_find_best_match() {
        let candidates = ["Frieren", "Overlord II", "Overlord Movie"];
        assert_eq!(find_best_match("Overlord", &candidates), Some("Overlord II"));

        let none: [&str; 0] = [];
        assert_eq!(find_best_match("Overlord", &none), None);
    }

    #[test]
    fn test_find_best_match_first_wins_ties() {
        let candidates = vec!["Overlord S02".to_string(), "Overlord Season 3".to_string()];
        let best = find_best_match_scored("Overlord", &candidates).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.candidate, "Overlord S02");
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_find_best_match_all_zero_picks_first() {
        let candidates = ["Bleach", "Naruto"];
        let best = find_best_match_scored("Overlord", &candidates).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_token_match_ratio() {
        let a = ["attack", "titan"];
        let b = ["attack", "titan", "final"];
        assert_eq!(token_match_ratio(&a, &b), 1.0);
        assert_eq!(token_match_ratio(&a, &["overlord"]), 0.0);
        assert_eq!(token_match_ratio::<&str>(&[], &["x"]), 0.0);
    }

    #[test]
    fn test_contains_all_tokens() {
        assert!(contains_all_tokens(&["attack", "titan"], &["attack", "titan", "final"]));
        assert!(!contains_all_tokens(&["attack", "giant"], &["attack", "titan"]));
        assert!(contains_all_tokens::<&str>(&[], &[]));
    }

    #[test]
    fn test_has_strong_match() {
        assert!(has_strong_match(&["overlord", "2"], &["overlord"]));
        assert!(!has_strong_match(&["2011", "the"], &["2011", "the"]));
        assert!(!has_strong_match::<&str>(&[], &["overlord"]));
    }
}

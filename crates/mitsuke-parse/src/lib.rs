//! Title normalization and fuzzy matching for anime titles and release names.
//!
//! Every function here is pure and total: no I/O, no shared state, and
//! "not found" is reported as `-1` rather than an error.

pub mod canonical;
pub mod compare;
pub mod extract;
pub mod format;
pub mod keyword;
pub mod query;
pub mod smart;
pub mod title;
pub mod tokens;

pub use canonical::canonicalize;
pub use compare::{
    compare_titles, contains_all_tokens, find_best_match, find_best_match_scored,
    has_strong_match, token_match_ratio, weighted_ratio, BestMatch,
};
pub use extract::{extract_part_number, extract_season_number, extract_year, NOT_FOUND};
pub use format::{detect_format, MediaFormat};
pub use query::{
    build_advanced_query, build_part_query, build_search_query, build_season_query,
    sanitize_query,
};
pub use smart::{build_smart_search_titles, SmartSearchResult};
pub use title::{normalize_title, NormalizedTitle};
pub use tokens::get_significant_tokens;

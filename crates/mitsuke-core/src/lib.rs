pub mod config;
pub mod error;
pub mod release;

pub use config::{LoggingConfig, MatchRules, MatcherConfig};
pub use error::MitsukeError;
pub use release::{LibraryTitles, MatchVerdict, RejectReason, ReleaseMatcher};

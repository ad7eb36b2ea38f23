use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mitsuke_core::{LibraryTitles, MatcherConfig, MitsukeError, ReleaseMatcher};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mitsuke", version)]
#[command(about = "Normalize anime titles, build indexer queries and match release names")]
struct Cli {
    /// Config file to use instead of the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full normalized record of a title.
    Normalize {
        title: String,
        /// Mark the record as the main variant.
        #[arg(long)]
        main: bool,
    },
    /// Season number, -1 if none.
    Season { title: String },
    /// Part/cour number, -1 if none.
    Part { title: String },
    /// Release year, -1 if none.
    Year { title: String },
    /// Significant tokens.
    Tokens { title: String },
    /// Release format (tv, ova, special, movie, creditless).
    Format { title: String },
    /// Match ratio between two titles.
    Compare { a: String, b: String },
    /// Best candidate for a target title.
    Best {
        target: String,
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// Strip query syntax from text.
    Sanitize { text: String },
    /// Compact search query for a title.
    Query { title: String },
    /// OR-grouped query over several titles.
    Advanced {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Query with season spelling alternatives.
    SeasonQuery {
        title: String,
        #[arg(allow_negative_numbers = true)]
        season: i32,
    },
    /// Query with part/cour spelling alternatives.
    PartQuery {
        title: String,
        #[arg(allow_negative_numbers = true)]
        part: i32,
    },
    /// Deduplicated search titles plus resolved season/part.
    Smart {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Decide whether a release belongs to a library entry.
    Evaluate {
        /// Entry title; repeat for each known variant.
        #[arg(long = "title", required = true)]
        titles: Vec<String>,
        /// Entry season, overriding the one read from the titles.
        #[arg(long)]
        season: Option<u32>,
        /// Entry part, overriding the one read from the titles.
        #[arg(long)]
        part: Option<u32>,
        release: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

impl Command {
    /// Only release matching reads the matcher rules.
    fn needs_config(&self) -> bool {
        matches!(self, Command::Evaluate { .. })
    }
}

fn run(cli: Cli) -> Result<(), MitsukeError> {
    let loaded = match &cli.config {
        Some(path) => MatcherConfig::load_from(path),
        None => MatcherConfig::load(),
    };
    let config = match loaded {
        Ok(config) => {
            init_logging(&config.logging.level);
            config
        }
        Err(e) if !cli.command.needs_config() => {
            let config = MatcherConfig::default();
            init_logging(&config.logging.level);
            tracing::warn!(error = %e, "config not loaded, using defaults");
            config
        }
        Err(e) => return Err(e),
    };
    tracing::debug!(command = ?cli.command, "running");

    match cli.command {
        Command::Normalize { title, main } => {
            let record = if main {
                mitsuke_parse::NormalizedTitle::main(&title)
            } else {
                mitsuke_parse::normalize_title(&title)
            };
            print_json(&record)
        }
        Command::Season { title } => print_json(&mitsuke_parse::extract_season_number(&title)),
        Command::Part { title } => print_json(&mitsuke_parse::extract_part_number(&title)),
        Command::Year { title } => print_json(&mitsuke_parse::extract_year(&title)),
        Command::Tokens { title } => print_json(&mitsuke_parse::get_significant_tokens(&title)),
        Command::Format { title } => print_json(&mitsuke_parse::detect_format(&title)),
        Command::Compare { a, b } => {
            print_json(&json!({ "ratio": mitsuke_parse::compare_titles(&a, &b) }))
        }
        Command::Best { target, candidates } => {
            print_json(&mitsuke_parse::find_best_match_scored(&target, &candidates))
        }
        Command::Sanitize { text } => print_json(&mitsuke_parse::sanitize_query(&text)),
        Command::Query { title } => print_json(&mitsuke_parse::build_search_query(&title)),
        Command::Advanced { titles } => {
            print_json(&mitsuke_parse::build_advanced_query(&titles))
        }
        Command::SeasonQuery { title, season } => {
            print_json(&mitsuke_parse::build_season_query(&title, season))
        }
        Command::PartQuery { title, part } => {
            print_json(&mitsuke_parse::build_part_query(&title, part))
        }
        Command::Smart { titles } => {
            print_json(&mitsuke_parse::build_smart_search_titles(&titles))
        }
        Command::Evaluate {
            titles,
            season,
            part,
            release,
        } => {
            let mut entry = LibraryTitles::new(&titles);
            if season.is_some() {
                entry = entry.with_season(season);
            }
            if part.is_some() {
                entry = entry.with_part(part);
            }
            let verdict = ReleaseMatcher::new(&config).evaluate(&entry, &release);
            print_json(&verdict)
        }
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mitsuke={level}")));
    // Already installed when `run` is called more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), MitsukeError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

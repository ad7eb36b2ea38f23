use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mitsuke_parse::MediaFormat;
use serde::{Deserialize, Serialize};

use crate::error::MitsukeError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level configuration for release matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub matcher: MatchRules,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// When a scraped release counts as the library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Minimum weighted token ratio, within `0.0..=1.0`.
    pub min_ratio: f64,
    pub strict_season: bool,
    pub strict_part: bool,
    pub allowed_formats: Vec<MediaFormat>,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            min_ratio: 0.8,
            strict_season: true,
            strict_part: true,
            allowed_formats: vec![MediaFormat::Tv],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl MatcherConfig {
    /// Load config: user file (if exists) over built-in defaults.
    pub fn load() -> Result<Self, MitsukeError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::parse(DEFAULT_CONFIG)
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, MitsukeError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML. Keys left out take their default value.
    pub fn parse(content: &str) -> Result<Self, MitsukeError> {
        let config: MatcherConfig =
            toml::from_str(content).map_err(|e| MitsukeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MitsukeError> {
        let ratio = self.matcher.min_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(MitsukeError::InvalidThreshold(ratio));
        }
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), MitsukeError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), MitsukeError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MitsukeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "mitsuke")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_matches_default() {
        let config = MatcherConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, MatcherConfig::default());
        assert_eq!(config.matcher.min_ratio, 0.8);
        assert!(config.matcher.strict_season);
        assert_eq!(config.matcher.allowed_formats, vec![MediaFormat::Tv]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = MatcherConfig::parse("[matcher]\nmin_ratio = 0.6\n").unwrap();
        assert_eq!(config.matcher.min_ratio, 0.6);
        assert!(config.matcher.strict_part);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_formats_parse() {
        let config =
            MatcherConfig::parse("[matcher]\nallowed_formats = [\"tv\", \"ova\"]\n").unwrap();
        assert_eq!(
            config.matcher.allowed_formats,
            vec![MediaFormat::Tv, MediaFormat::Ova]
        );
        assert!(MatcherConfig::parse("[matcher]\nallowed_formats = [\"vhs\"]\n").is_err());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = MatcherConfig::parse("[matcher]\nmin_ratio = 1.5\n").unwrap_err();
        assert!(matches!(err, MitsukeError::InvalidThreshold(r) if r == 1.5));
    }

    #[test]
    fn test_invalid_toml() {
        let err = MatcherConfig::parse("[matcher\n").unwrap_err();
        assert!(matches!(err, MitsukeError::Config(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = MatcherConfig::default();
        config.matcher.min_ratio = 0.65;
        config.matcher.allowed_formats.push(MediaFormat::Movie);
        config.save_to(&path).unwrap();

        let loaded = MatcherConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_rejects_invalid_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = MatcherConfig::default();
        config.matcher.min_ratio = -0.1;
        assert!(config.save_to(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MatcherConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, MitsukeError::Io(_)));
    }
}

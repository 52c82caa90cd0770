//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the timecard
//! bot configuration from a YAML file.

use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::calculation::resolve_timezone;
use crate::error::{EngineError, EngineResult};
use crate::models::PeriodAlignment;

use super::continuation::ContinuationStore;
use super::types::TimebotConfig;

/// Loads and provides access to the bot configuration.
///
/// The timezone name is resolved once at load time, so an unknown zone is
/// reported as a configuration error rather than on the first request.
///
/// # Example
///
/// ```no_run
/// use timecard_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timebot.yaml")?;
/// println!("{} pays in {}", loader.config().company, loader.timezone());
/// # Ok::<(), timecard_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TimebotConfig,
    timezone: Tz,
}

impl ConfigLoader {
    /// Loads the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read and
    /// [`EngineError::ConfigParseError`] if it is not valid configuration or
    /// names an unknown timezone.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config: TimebotConfig = Self::load_yaml(path)?;
        Self::validate(config, &path.display().to_string())
    }

    /// Builds a loader from an already-deserialized configuration.
    pub fn from_config(config: TimebotConfig) -> EngineResult<Self> {
        Self::validate(config, "<inline>")
    }

    fn validate(config: TimebotConfig, source: &str) -> EngineResult<Self> {
        let timezone =
            resolve_timezone(&config.timezone).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        if config.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(EngineError::ConfigParseError {
                path: source.to_string(),
                message: "at least one submission keyword is required".to_string(),
            });
        }

        Ok(Self { config, timezone })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the raw configuration.
    pub fn config(&self) -> &TimebotConfig {
        &self.config
    }

    /// The resolved payroll timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Which weekday pay periods start on.
    pub fn alignment(&self) -> PeriodAlignment {
        self.config.alignment
    }

    /// Hourly wage for the estimated payroll cost.
    pub fn hourly_wage(&self) -> Decimal {
        self.config.hourly_wage
    }

    /// Submission keywords, lower-cased.
    pub fn keywords(&self) -> Vec<String> {
        self.config
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// The store holding the end of the last period sent.
    pub fn continuation_store(&self) -> ContinuationStore {
        ContinuationStore::new(&self.config.continuation_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/timebot.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_config(dir: &tempfile::TempDir, yaml: &str) -> std::path::PathBuf {
        let path = dir.path().join("timebot.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_load_valid_configuration() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().company, "Poulsen Construction");
        assert_eq!(loader.timezone(), chrono_tz::America::Denver);
        assert_eq!(loader.alignment(), PeriodAlignment::Sunday);
        assert_eq!(loader.hourly_wage(), dec("30.00"));
        assert_eq!(loader.keywords(), vec!["time", "hours"]);
    }

    #[test]
    fn test_missing_file_returns_not_found() {
        match ConfigLoader::load("./config/does-not-exist.yaml") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("does-not-exist.yaml"))
            }
            other => panic!("Expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_timezone_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "company: Acme\ntimezone: Mars/Olympus\nhourly_wage: \"20\"\n",
        );

        match ConfigLoader::load(&path) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("Mars/Olympus"))
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "company: [unterminated\n");
        assert!(matches!(
            ConfigLoader::load(&path),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_defaults_and_keyword_normalisation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            concat!(
                "company: Acme\n",
                "timezone: UTC\n",
                "alignment: monday\n",
                "hourly_wage: \"22.50\"\n",
                "keywords: [\" Clock \", \"\"]\n",
            ),
        );

        let loader = ConfigLoader::load(&path).unwrap();
        assert_eq!(loader.alignment(), PeriodAlignment::Monday);
        assert_eq!(loader.keywords(), vec!["clock"]);
        assert_eq!(
            loader.continuation_store().path(),
            Path::new("./state/last_period_end")
        );
    }

    #[test]
    fn test_blank_keywords_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "company: Acme\ntimezone: UTC\nhourly_wage: \"20\"\nkeywords: [\"  \"]\n",
        );
        assert!(matches!(
            ConfigLoader::load(&path),
            Err(EngineError::ConfigParseError { .. })
        ));
    }
}

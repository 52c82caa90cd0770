//! Configuration types for the Timecard Engine.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the YAML configuration file.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PeriodAlignment;

/// Keywords that mark a text message as a time submission when none are
/// configured.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["time", "hours"];

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_continuation_path() -> PathBuf {
    PathBuf::from("./state/last_period_end")
}

/// Top-level configuration file structure.
///
/// # Example
///
/// ```
/// use timecard_engine::config::TimebotConfig;
/// use timecard_engine::models::PeriodAlignment;
///
/// let yaml = r#"
/// company: "Poulsen Construction"
/// timezone: "America/Denver"
/// alignment: monday
/// hourly_wage: "30.00"
/// "#;
/// let config: TimebotConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(config.alignment, PeriodAlignment::Monday);
/// assert_eq!(config.keywords, vec!["time", "hours"]);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TimebotConfig {
    /// Company name shown on time cards.
    pub company: String,
    /// IANA timezone payroll dates are computed in.
    pub timezone: String,
    /// Which weekday pay periods start on.
    #[serde(default)]
    pub alignment: PeriodAlignment,
    /// Hourly wage used for the estimated payroll cost.
    pub hourly_wage: Decimal,
    /// Leading words that mark a message as a time submission.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// File holding the end date of the last period sent.
    #[serde(default = "default_continuation_path")]
    pub continuation_path: PathBuf,
}

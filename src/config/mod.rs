//! Configuration loading and management for the Timecard Engine.
//!
//! This module loads the bot configuration from a YAML file and keeps the
//! continuation state that links one time card run to the next.
//!
//! # Example
//!
//! ```no_run
//! use timecard_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timebot.yaml").unwrap();
//! println!("Loaded config for: {}", config.config().company);
//! ```

mod continuation;
mod loader;
mod types;

pub use continuation::ContinuationStore;
pub use loader::ConfigLoader;
pub use types::{DEFAULT_KEYWORDS, TimebotConfig};

//! Application state for the Timecard Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded bot configuration.
#[derive(Clone)]
pub struct AppState {
    /// The loaded bot configuration.
    config: Arc<ConfigLoader>,
    /// Lower-cased submission keywords.
    keywords: Arc<[String]>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let keywords = config.keywords().into();
        Self {
            config: Arc::new(config),
            keywords,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Words that mark a message as a time submission.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_keywords_are_taken_from_config() {
        let config = ConfigLoader::load("./config/timebot.yaml").unwrap();
        let state = AppState::new(config);
        assert_eq!(state.keywords(), ["time".to_string(), "hours".to_string()]);
    }
}

//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TALENT_SCOUT`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use talent_scout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Question generation provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Snapshot storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present (for development), then reads
    /// environment variables with the `TALENT_SCOUT` prefix:
    ///
    /// - `TALENT_SCOUT__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key`
    /// - `TALENT_SCOUT__STORAGE__SNAPSHOT_DIR=./data` -> `storage.snapshot_dir`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALENT_SCOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including a missing Gemini API key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TALENT_SCOUT__AI__GEMINI_API_KEY", "test-key");
    }

    fn clear_env() {
        env::remove_var("TALENT_SCOUT__AI__GEMINI_API_KEY");
        env::remove_var("TALENT_SCOUT__AI__MODEL");
        env::remove_var("TALENT_SCOUT__STORAGE__SNAPSHOT_DIR");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("test-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.storage.snapshot_dir, "./data");
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_snapshot_dir() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TALENT_SCOUT__STORAGE__SNAPSHOT_DIR", "/tmp/sessions");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.snapshot_dir, "/tmp/sessions");
    }
}

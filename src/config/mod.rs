//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `REPORTING` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use reporting_backend::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod app;
mod database;
mod error;
mod slack;

pub use app::{AppSettings, Environment};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use slack::SlackConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment, log level and forecast window
    #[serde(default)]
    pub app: AppSettings,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Slack announcements
    #[serde(default)]
    pub slack: SlackConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REPORTING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `REPORTING__DATABASE__URL=...` -> `database.url = ...`
    /// - `REPORTING__SLACK__CHANNEL=#admin` -> `slack.channel = "#admin"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REPORTING")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.app.validate()?;
        self.database.validate()?;
        self.slack.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("REPORTING__DATABASE__URL", "postgresql://reporting@localhost/reporting");
    }

    fn clear_env() {
        env::remove_var("REPORTING__DATABASE__URL");
        env::remove_var("REPORTING__APP__ENVIRONMENT");
        env::remove_var("REPORTING__SLACK__BOT_TOKEN");
        env::remove_var("REPORTING__SLACK__CHANNEL");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://reporting@localhost/reporting");
        assert!(!config.slack.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("REPORTING__APP__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_slack_section_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("REPORTING__SLACK__BOT_TOKEN", "xoxb-abc");
        env::set_var("REPORTING__SLACK__CHANNEL", "#admin");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.slack.is_enabled());
        assert_eq!(config.slack.channel, "#admin");
    }
}

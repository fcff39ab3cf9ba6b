//! Application-wide settings

use serde::Deserialize;

use super::error::ValidationError;

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Environment name
    #[serde(default)]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Months before today included in the income forecast
    #[serde(default = "default_forecast_months_back")]
    pub forecast_months_back: i32,

    /// Months after today included in the income forecast
    #[serde(default = "default_forecast_months_ahead")]
    pub forecast_months_ahead: i32,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl AppSettings {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate application settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("LOG_LEVEL"));
        }
        if self.forecast_months_back < 0 || self.forecast_months_ahead < 0 {
            return Err(ValidationError::InvalidForecastWindow);
        }
        Ok(())
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: default_log_level(),
            forecast_months_back: default_forecast_months_back(),
            forecast_months_ahead: default_forecast_months_ahead(),
        }
    }
}

fn default_log_level() -> String {
    "info,reporting_backend=debug".to_string()
}

fn default_forecast_months_back() -> i32 {
    2
}

fn default_forecast_months_ahead() -> i32 {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.environment, Environment::Development);
        assert_eq!(settings.forecast_months_back, 2);
        assert_eq!(settings.forecast_months_ahead, 6);
        assert!(!settings.is_production());
    }

    #[test]
    fn test_validation_negative_window() {
        let settings = AppSettings {
            forecast_months_back: -1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_empty_log_level() {
        let settings = AppSettings {
            log_level: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}

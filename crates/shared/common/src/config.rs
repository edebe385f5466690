//! Shared configuration loaded from environment variables.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default service name used in logs
pub const DEFAULT_SERVICE_NAME: &str = "user-registry";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default page size for list queries
pub const DEFAULT_PER_PAGE: u64 = repository::DEFAULT_PER_PAGE;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" => Some(AppEnvironment::Development),
            "test" => Some(AppEnvironment::Test),
            "production" => Some(AppEnvironment::Production),
            _ => None,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnvironment::Production)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnvironment::Development => write!(f, "development"),
            AppEnvironment::Test => write!(f, "test"),
            AppEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    pub environment: AppEnvironment,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Page size applied when a query does not give one
    pub default_per_page: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            environment: AppEnvironment::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = match lookup("APP_ENV") {
            Some(value) => AppEnvironment::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown APP_ENV, using development");
                AppEnvironment::Development
            }),
            None => defaults.environment,
        };

        Self {
            service_name: lookup("SERVICE_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.service_name),
            environment,
            log_level: lookup("LOG_LEVEL")
                .filter(|level| !level.is_empty())
                .unwrap_or(defaults.log_level),
            default_per_page: lookup("DEFAULT_PER_PAGE")
                .and_then(|v| v.parse().ok())
                .filter(|per_page: &u64| *per_page >= 1)
                .unwrap_or(defaults.default_per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RegistryConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.default_per_page, 10);
    }

    #[test]
    fn test_reads_values() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "Production"),
            ("SERVICE_NAME", "registry-test"),
            ("LOG_LEVEL", "debug"),
            ("DEFAULT_PER_PAGE", "25"),
        ]));

        assert!(config.environment.is_production());
        assert_eq!(config.service_name, "registry-test");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_per_page, 25);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "staging"),
            ("DEFAULT_PER_PAGE", "0"),
        ]));

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.default_per_page, DEFAULT_PER_PAGE);

        let config = RegistryConfig::from_lookup(lookup_from(&[("DEFAULT_PER_PAGE", "many")]));
        assert_eq!(config.default_per_page, DEFAULT_PER_PAGE);
    }
}

//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::locale::Locale;

pub const ORIGIN_ENV: &str = "TASKS_ORIGIN";
pub const LOCALE_ENV: &str = "TASKS_LOCALE";

/// Settings fixed at startup. `origin` is what a browser page would report
/// as `window.location.origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub origin: String,
    pub locale: Locale,
    pub success_duration: Duration,
    pub error_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:8000".to_string(),
            locale: Locale::default(),
            success_duration: Duration::from_secs(3),
            error_duration: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Defaults overridden by `TASKS_ORIGIN` and `TASKS_LOCALE` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(origin) = lookup(ORIGIN_ENV) {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidOrigin(origin));
            }
            config.origin = origin;
        }
        if let Some(locale) = lookup(LOCALE_ENV) {
            config.locale = locale.parse()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = ClientConfig::default();
        assert_eq!(config.success_duration, Duration::from_secs(3));
        assert_eq!(config.error_duration, Duration::from_secs(5));
        assert_eq!(config.locale, Locale::Ru);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ClientConfig::from_lookup(|key| match key {
            ORIGIN_ENV => Some("https://tasks.example".to_string()),
            LOCALE_ENV => Some("en".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.origin, "https://tasks.example");
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn from_env_reads_process_environment() {
        env::set_var(ORIGIN_ENV, "https://env.example");
        env::set_var(LOCALE_ENV, "en-US");
        let config = ClientConfig::from_env();
        env::remove_var(ORIGIN_ENV);
        env::remove_var(LOCALE_ENV);

        let config = config.unwrap();
        assert_eq!(config.origin, "https://env.example");
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn lookup_rejects_origin_without_scheme() {
        let err = ClientConfig::from_lookup(|key| {
            (key == ORIGIN_ENV).then(|| "tasks.example".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidOrigin("tasks.example".to_string()));
    }

    #[test]
    fn lookup_rejects_unknown_locale() {
        let err =
            ClientConfig::from_lookup(|key| (key == LOCALE_ENV).then(|| "fr".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::UnknownLocale("fr".to_string()));
    }
}

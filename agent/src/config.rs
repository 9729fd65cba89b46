//! Agent configuration loaded via OrthoConfig.
//!
//! Values come from `DATAGEN_*` environment variables, CLI flags and an
//! optional configuration file. The API key additionally falls back to the
//! conventional `GOOGLE_API_KEY` and `GEMINI_API_KEY` variables.

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::gemini::{DEFAULT_SYSTEM_PROMPT, GeminiSettings};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEMPERATURE: f32 = 0.0;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const API_KEY_FALLBACK_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Configuration values for the DataGen agent.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATAGEN")]
pub struct AgentSettings {
    /// Gemini API key.
    pub api_key: Option<String>,
    /// Gemini model identifier.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Gemini API root URL.
    pub base_url: Option<String>,
    /// Maximum model calls per user turn.
    #[ortho_config(default = 50)]
    pub max_steps: u32,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Fixed RNG seed for reproducible generated data.
    pub seed: Option<u64>,
}

/// Reasons the loaded configuration cannot drive the Gemini adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// No API key was configured anywhere.
    #[error(
        "no Gemini API key configured; set DATAGEN_API_KEY, GOOGLE_API_KEY or GEMINI_API_KEY"
    )]
    MissingApiKey,
    /// The base URL does not parse.
    #[error("invalid base URL '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
}

impl AgentSettings {
    /// Return the configured API key, falling back to the conventional
    /// environment variables. Blank values count as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .into_iter()
            .chain(
                API_KEY_FALLBACK_VARS
                    .iter()
                    .filter_map(|name| env::var(name).ok()),
            )
            .map(|key| key.trim().to_owned())
            .find(|key| !key.is_empty())
    }

    /// Return the configured model, falling back to the default.
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Return the configured temperature, falling back to the default.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Return the configured API root, falling back to the default.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured request timeout, falling back to the default.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Resolve everything the Gemini adapter needs.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingApiKey`] when no key is available and
    /// [`SettingsError::InvalidBaseUrl`] when the base URL does not parse.
    pub fn gemini_settings(&self) -> Result<GeminiSettings, SettingsError> {
        let api_key = self.api_key().ok_or(SettingsError::MissingApiKey)?;
        let base_url = Url::parse(self.base_url()).map_err(|error| SettingsError::InvalidBaseUrl {
            value: self.base_url().to_owned(),
            message: error.to_string(),
        })?;
        Ok(GeminiSettings {
            base_url,
            model: self.model().to_owned(),
            api_key,
            temperature: self.temperature(),
            max_steps: self.max_steps,
            request_timeout: self.request_timeout(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for agent configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const ALL_VARS: [&str; 9] = [
        "DATAGEN_API_KEY",
        "DATAGEN_MODEL",
        "DATAGEN_TEMPERATURE",
        "DATAGEN_BASE_URL",
        "DATAGEN_MAX_STEPS",
        "DATAGEN_REQUEST_TIMEOUT_SECS",
        "DATAGEN_SEED",
        "GOOGLE_API_KEY",
        "GEMINI_API_KEY",
    ];

    fn cleared_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn unset() -> AgentSettings {
        AgentSettings {
            api_key: None,
            model: None,
            temperature: None,
            base_url: None,
            max_steps: 50,
            request_timeout_secs: None,
            seed: None,
        }
    }

    fn load_from_empty_args() -> AgentSettings {
        AgentSettings::load_from_iter([OsString::from("datagen")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env(&[]));

        let settings = load_from_empty_args();

        assert_eq!(settings.model(), DEFAULT_MODEL);
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.max_steps, 50);
        assert_eq!(settings.request_timeout(), Duration::from_secs(120));
        assert!(settings.temperature().abs() < f32::EPSILON);
        assert!(settings.seed.is_none());
        assert!(settings.api_key().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_env(&[
            ("DATAGEN_API_KEY", "primary-key"),
            ("DATAGEN_MODEL", "gemini-2.5-pro"),
            ("DATAGEN_MAX_STEPS", "8"),
            ("DATAGEN_REQUEST_TIMEOUT_SECS", "30"),
            ("DATAGEN_SEED", "2026"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(settings.api_key().as_deref(), Some("primary-key"));
        assert_eq!(settings.model(), "gemini-2.5-pro");
        assert_eq!(settings.max_steps, 8);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.seed, Some(2026));
    }

    #[rstest]
    #[case(&[("GOOGLE_API_KEY", "google-key")], Some("google-key"))]
    #[case(&[("GEMINI_API_KEY", "gemini-key")], Some("gemini-key"))]
    #[case(
        &[("GOOGLE_API_KEY", "google-key"), ("GEMINI_API_KEY", "gemini-key")],
        Some("google-key")
    )]
    #[case(&[("DATAGEN_API_KEY", "own-key"), ("GOOGLE_API_KEY", "google-key")], Some("own-key"))]
    #[case(&[("GOOGLE_API_KEY", "  "), ("GEMINI_API_KEY", "gemini-key")], Some("gemini-key"))]
    fn api_key_falls_back_to_conventional_variables(
        #[case] vars: &[(&str, &str)],
        #[case] expected: Option<&str>,
    ) {
        let _guard = lock_env(cleared_env(vars));

        let settings = load_from_empty_args();

        assert_eq!(settings.api_key().as_deref(), expected);
    }

    #[rstest]
    fn google_key_alone_resolves_gemini_settings() {
        let _guard = lock_env(cleared_env(&[("GOOGLE_API_KEY", "google-key")]));

        let gemini = load_from_empty_args()
            .gemini_settings()
            .expect("settings should resolve");

        assert_eq!(gemini.api_key, "google-key");
        assert_eq!(gemini.max_steps, 50);
        assert_eq!(gemini.model, DEFAULT_MODEL);
    }

    #[test]
    fn missing_api_key_is_reported() {
        let _guard = lock_env(cleared_env(&[]));

        let result = unset().gemini_settings();

        assert_eq!(result, Err(SettingsError::MissingApiKey));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let _guard = lock_env(cleared_env(&[]));
        let settings = AgentSettings {
            api_key: Some("key".to_owned()),
            base_url: Some("not a url".to_owned()),
            ..unset()
        };

        let result = settings.gemini_settings();

        assert!(
            matches!(result, Err(SettingsError::InvalidBaseUrl { ref value, .. }) if value == "not a url"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn gemini_settings_carry_resolved_values() {
        let _guard = lock_env(cleared_env(&[]));
        let settings = AgentSettings {
            api_key: Some("key".to_owned()),
            temperature: Some(0.5),
            max_steps: 10,
            ..unset()
        };

        let gemini = settings.gemini_settings().expect("settings should resolve");

        assert_eq!(gemini.api_key, "key");
        assert_eq!(gemini.model, DEFAULT_MODEL);
        assert_eq!(gemini.base_url.as_str(), "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(gemini.max_steps, 10);
        assert!((gemini.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(gemini.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}

//! Fact checker configuration.
//!
//! Configuration is passed explicitly to [`crate::FactChecker::new`]. Only
//! [`FactCheckConfig::from_env`] touches the process environment; a missing
//! API key is not an error at this point and surfaces later as an `ERROR`
//! verdict.

use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Settings for a [`crate::FactChecker`].
#[derive(Debug)]
pub struct FactCheckConfig {
    api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: gemini_client::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FactCheckConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` if present, then:
    /// - `GEMINI_API_KEY` (falls back to `API_KEY`)
    /// - `GEMINI_MODEL` (default [`DEFAULT_MODEL`])
    /// - `GEMINI_BASE_URL` (default [`gemini_client::DEFAULT_BASE_URL`])
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: get("GEMINI_API_KEY")
                .or_else(|| get("API_KEY"))
                .map(SecretString::from),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(SecretString::from(api_key))
        };
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Expose the API key. Only call this when building the HTTP client.
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = FactCheckConfig::from_lookup(lookup(&[]));

        assert!(!config.has_api_key());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, gemini_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_reads_gemini_variables() {
        let config = FactCheckConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g-key"),
            ("API_KEY", "legacy-key"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000"),
        ]));

        assert_eq!(config.api_key(), Some("g-key"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_falls_back_to_api_key() {
        let config = FactCheckConfig::from_lookup(lookup(&[("API_KEY", "legacy-key")]));
        assert_eq!(config.api_key(), Some("legacy-key"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = FactCheckConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "   "),
            ("GEMINI_MODEL", ""),
        ]));

        assert!(!config.has_api_key());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!FactCheckConfig::default().with_api_key("").has_api_key());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = FactCheckConfig::default().with_api_key("super-secret");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(config.has_api_key());
    }
}

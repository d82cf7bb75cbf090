use std::fmt;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Eternity";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gemini model used for risk analysis unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on a single inference call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Value shipped in sample env files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_LEGACY: &str = "API_KEY";
pub const ENV_MODEL: &str = "ETERNITY_MODEL";
pub const ENV_BASE_URL: &str = "ETERNITY_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ETERNITY_TIMEOUT_SECS";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "eternity=info,warn"
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidUrl(String),

    #[error("Invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Inference settings, resolved once and injected into the analyzer.
#[derive(Clone, PartialEq)]
pub struct AnalysisConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AnalysisConfig {
    /// No credential: every analysis uses demo data.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = normalize_api_key(Some(key.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_base_url(url)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::unconfigured();

        config.api_key = normalize_api_key(lookup(ENV_API_KEY))
            .or_else(|| normalize_api_key(lookup(ENV_API_KEY_LEGACY)));

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = validate_base_url(url.trim())?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            };
        }

        tracing::debug!(
            configured = config.is_configured(),
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "Analysis configuration resolved"
        );

        Ok(config)
    }

    /// A usable (present, non-placeholder) credential is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

// Never print the credential.
impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Blank and placeholder keys count as absent.
fn normalize_api_key(raw: Option<String>) -> Option<String> {
    let key = raw?.trim().to_string();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        None
    } else {
        Some(key)
    }
}

fn validate_base_url(url: &str) -> Result<String, ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidUrl(url.to_string()))?;
    if rest.trim_matches('/').is_empty() {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_is_unconfigured() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!config.is_configured());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn placeholder_key_counts_as_absent() {
        let config =
            AnalysisConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "YOUR_API_KEY")])).unwrap();
        assert!(!config.is_configured());

        let config = AnalysisConfig::unconfigured().with_api_key("   ");
        assert!(!config.is_configured());
    }

    #[test]
    fn legacy_key_used_when_primary_missing() {
        let config =
            AnalysisConfig::from_lookup(lookup_from(&[(ENV_API_KEY_LEGACY, "abc123")])).unwrap();
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[test]
    fn primary_key_wins() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "primary"),
            (ENV_API_KEY_LEGACY, "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), Some("primary"));
    }

    #[test]
    fn overrides_model_url_and_timeout() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            (ENV_MODEL, "gemini-2.5-flash"),
            (ENV_BASE_URL, "http://127.0.0.1:8080/"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn rejects_bad_url_and_timeout() {
        let err = AnalysisConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "ftp://x")]));
        assert!(matches!(err, Err(ConfigError::InvalidUrl(_))));

        let err = AnalysisConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(matches!(err, Err(ConfigError::InvalidTimeout(_))));

        let err = AnalysisConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(err, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = AnalysisConfig::unconfigured().with_api_key("super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn app_name_is_eternity() {
        assert_eq!(APP_NAME, "Eternity");
    }
}

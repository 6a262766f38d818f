//! Configuration types.

use std::time::Duration;

/// Wizard engine configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Cosmetic delay before the website analysis result is applied, so the
    /// hosting surface can show a processing state.
    pub analysis_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(1800),
        }
    }
}

impl WizardConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let analysis_delay_ms: u64 = std::env::var("WIZARD_ANALYSIS_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1800);

        Self {
            analysis_delay: Duration::from_millis(analysis_delay_ms),
        }
    }
}

/// Remote brand API client configuration.
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Base URL of the brand API, without a trailing slash.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub api_token: Option<secrecy::SecretString>,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SubmitConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("BRAND_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001/api".to_string());

        let api_token = std::env::var("BRAND_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(secrecy::SecretString::from);

        let request_timeout_secs: u64 = std::env::var("BRAND_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            base_url,
            api_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.analysis_delay, Duration::from_millis(1800));
    }

    #[test]
    fn submit_defaults() {
        let config = SubmitConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert!(config.api_token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}

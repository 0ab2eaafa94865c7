//! Slotline runtime configuration schema.

use serde::{Deserialize, Serialize};

/// Root configuration. Every field has a default so a bare process starts
/// in mock mode with no file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotlineConfig {
    /// HTTP server bind address.
    pub bind_address: String,
    /// HTTP server port.
    pub port: u16,

    /// Whole-service fixture switch; real API calls only when false.
    pub use_mock_api: bool,
    /// Scheduling API base URL. A literal `{env}` token is substituted
    /// with the subdomain mapped from `environment`.
    pub api_base_url: String,
    /// Deployment environment: dev | qa | staging | prod.
    pub environment: String,
    /// Rollout guards for the write steps; even with mock mode off,
    /// confirm/cancel stay on fixtures until these are set.
    pub enable_real_confirm: bool,
    pub enable_real_cancel: bool,
    /// Outbound request timeout, seconds.
    pub request_timeout_secs: u64,

    /// SQLite session database path; `:memory:` for an ephemeral store.
    pub session_db: String,
    /// Session time-to-live, seconds.
    pub session_ttl_secs: u64,

    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
    /// Directory for rolling JSON log files; console-only when unset.
    pub log_dir: Option<String>,
}

impl Default for SlotlineConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            use_mock_api: true,
            api_base_url: "https://api.projectsforce.com".to_string(),
            environment: "dev".to_string(),
            enable_real_confirm: false,
            enable_real_cancel: false,
            request_timeout_secs: 30,
            session_db: "slotline-sessions.db".to_string(),
            session_ttl_secs: 86_400,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl SlotlineConfig {
    /// Map the environment name to its URL subdomain (`prod` → `apps`).
    pub fn env_subdomain(&self) -> &str {
        match self.environment.as_str() {
            "qa" => "qa",
            "staging" => "staging",
            "prod" => "apps",
            _ => "dev",
        }
    }

    /// Base URL with any `{env}` token resolved.
    pub fn resolved_base_url(&self) -> String {
        self.api_base_url.replace("{env}", self.env_subdomain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_mock_and_local() {
        let config = SlotlineConfig::default();
        assert!(config.use_mock_api);
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn env_token_substitution() {
        let config = SlotlineConfig {
            api_base_url: "https://{env}.projectsforce.com".to_string(),
            environment: "prod".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "https://apps.projectsforce.com");
    }

    #[test]
    fn plain_base_url_passes_through() {
        let config = SlotlineConfig::default();
        assert_eq!(config.resolved_base_url(), "https://api.projectsforce.com");
    }

    #[test]
    fn unknown_environment_falls_back_to_dev() {
        let config = SlotlineConfig {
            environment: "weird".to_string(),
            ..Default::default()
        };
        assert_eq!(config.env_subdomain(), "dev");
    }
}

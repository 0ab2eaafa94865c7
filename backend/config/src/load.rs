//! Config loading: defaults, then an optional YAML file, then environment
//! variable overrides; later layers win.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::schema::SlotlineConfig;

/// Load configuration. `path` is optional; a missing file is only an error
/// when the caller named one explicitly.
pub fn load_config(path: Option<&Path>) -> Result<SlotlineConfig> {
    let mut config = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read config file {}", p.display()))?;
            let config: SlotlineConfig =
                serde_yaml::from_str(&raw).context("Failed to parse config YAML")?;
            info!(path = %p.display(), "Loaded config file");
            config
        }
        None => SlotlineConfig::default(),
    };
    apply_env_overrides(&mut config, &std::env::vars().collect());
    Ok(config)
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Apply overrides from a provided env map (separated out for testing).
pub fn apply_env_overrides(config: &mut SlotlineConfig, env: &HashMap<String, String>) {
    if let Some(v) = env.get("SLOTLINE_BIND") {
        config.bind_address = v.clone();
    }
    if let Some(v) = env.get("SLOTLINE_PORT").and_then(|v| v.parse().ok()) {
        config.port = v;
    }
    if let Some(v) = env.get("USE_MOCK_API") {
        config.use_mock_api = parse_bool(v);
    }
    if let Some(v) = env.get("SCHEDULER_API_URL") {
        config.api_base_url = v.clone();
    }
    if let Some(v) = env.get("ENVIRONMENT") {
        config.environment = v.clone();
    }
    if let Some(v) = env.get("ENABLE_REAL_CONFIRM") {
        config.enable_real_confirm = parse_bool(v);
    }
    if let Some(v) = env.get("ENABLE_REAL_CANCEL") {
        config.enable_real_cancel = parse_bool(v);
    }
    if let Some(v) = env.get("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        config.request_timeout_secs = v;
    }
    if let Some(v) = env.get("SESSION_DB") {
        config.session_db = v.clone();
    }
    if let Some(v) = env.get("SESSION_TTL_SECS").and_then(|v| v.parse().ok()) {
        config.session_ttl_secs = v;
    }
    if let Some(v) = env.get("RUST_LOG") {
        config.log_level = v.clone();
    }
    if let Some(v) = env.get("SLOTLINE_LOG_DIR") {
        config.log_dir = Some(v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = SlotlineConfig::default();
        apply_env_overrides(
            &mut config,
            &env(&[
                ("USE_MOCK_API", "false"),
                ("SLOTLINE_PORT", "9090"),
                ("SCHEDULER_API_URL", "https://qa.projectsforce.com"),
                ("ENABLE_REAL_CONFIRM", "TRUE"),
            ]),
        );
        assert!(!config.use_mock_api);
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_base_url, "https://qa.projectsforce.com");
        assert!(config.enable_real_confirm);
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let mut config = SlotlineConfig::default();
        apply_env_overrides(&mut config, &env(&[("SLOTLINE_PORT", "not-a-port")]));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn yaml_round_trip() {
        let yaml = "use_mock_api: false\nport: 9999\nsession_db: ':memory:'\n";
        let config: SlotlineConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.use_mock_api);
        assert_eq!(config.port, 9999);
        assert_eq!(config.session_db, ":memory:");
        // Unspecified fields keep their defaults.
        assert_eq!(config.environment, "dev");
    }
}

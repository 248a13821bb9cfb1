// File: src/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TEMPERATURE: f64 = 0.3;

/// Runtime settings, read from the environment with sensible defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = get("ELECTROVIZ_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("ELECTROVIZ_MODEL").unwrap_or(defaults.model),
            endpoint: get("ELECTROVIZ_ENDPOINT")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            timeout,
            data_dir: get("ELECTROVIZ_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("electroviz");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.data_dir.ends_with("electroviz"));
    }

    #[test]
    fn api_key_falls_back_to_generic_name() {
        assert_eq!(config_from(&[("API_KEY", "k1")]).api_key.as_deref(), Some("k1"));
        let both = config_from(&[("API_KEY", "k1"), ("GEMINI_API_KEY", "k2")]);
        assert_eq!(both.api_key.as_deref(), Some("k2"));
        assert!(config_from(&[("GEMINI_API_KEY", "  ")]).api_key.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("ELECTROVIZ_MODEL", "gemini-2.0-pro"),
            ("ELECTROVIZ_ENDPOINT", "http://localhost:8080/"),
            ("ELECTROVIZ_TIMEOUT_SECS", "5"),
            ("ELECTROVIZ_DATA_DIR", "/tmp/ev"),
        ]);
        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ev"));
    }

    #[test]
    fn bad_timeout_uses_default() {
        for bad in ["zero", "0", "-3"] {
            let config = config_from(&[("ELECTROVIZ_TIMEOUT_SECS", bad)]);
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }
}

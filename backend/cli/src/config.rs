use std::time::Duration;

use anyhow::{bail, Result};

/// Pawtoon runtime configuration.
///
/// Credentials come from the environment only; there is no file fallback
/// and nothing is ever baked into the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Gemini API key (required)
    pub gemini_api_key: String,
    /// imgBB API key (required)
    pub imgbb_api_key: String,
    /// Base URL of the rembg background-removal server
    pub rembg_url: String,
    /// Timeout applied to every external call
    pub http_timeout: Duration,
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Directory for the rolling log file; console-only when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when a required credential is missing: the service cannot do
    /// anything useful without its upstream keys.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup (useful for testing).
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(gemini_api_key) = get("GEMINI_API_KEY") else {
            bail!("GEMINI_API_KEY is not set");
        };
        let Some(imgbb_api_key) = get("IMGBB_API_KEY") else {
            bail!("IMGBB_API_KEY is not set");
        };

        Ok(Self {
            bind_address: get("PAWTOON_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PAWTOON_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_key,
            imgbb_api_key,
            rembg_url: get("REMBG_URL").unwrap_or_else(|| "http://localhost:7000".to_string()),
            http_timeout: Duration::from_secs(
                get("PAWTOON_HTTP_TIMEOUT_SECS")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            ),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: get("PAWTOON_LOG_DIR"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_applied_with_required_keys() {
        let vars = env(&[("GEMINI_API_KEY", "g-key"), ("IMGBB_API_KEY", "i-key")]);
        let config = Config::from_vars(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rembg_url, "http://localhost:7000");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn missing_gemini_key_fails() {
        let vars = env(&[("IMGBB_API_KEY", "i-key")]);
        let err = Config::from_vars(|name| vars.get(name).cloned()).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn missing_imgbb_key_fails() {
        let vars = env(&[("GEMINI_API_KEY", "g-key")]);
        let err = Config::from_vars(|name| vars.get(name).cloned()).unwrap_err();
        assert!(err.to_string().contains("IMGBB_API_KEY"));
    }

    #[test]
    fn overrides_win() {
        let vars = env(&[
            ("GEMINI_API_KEY", "g-key"),
            ("IMGBB_API_KEY", "i-key"),
            ("PAWTOON_PORT", "9090"),
            ("PAWTOON_HTTP_TIMEOUT_SECS", "5"),
            ("REMBG_URL", "http://rembg.internal:7000"),
        ]);
        let config = Config::from_vars(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.rembg_url, "http://rembg.internal:7000");
    }
}

// ⚙️ Configuration - environment variables (plus optional .env file)

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_DELEGATE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection details for the external classifier
#[derive(Clone, PartialEq, Eq)]
pub struct DelegateConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

// Keep the key out of logs
impl fmt::Debug for DelegateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` when no API key is set; the assistant then runs fallback-only
    pub delegate: Option<DelegateConfig>,

    pub bind_addr: String,

    /// Request-level timeout applied by the HTTP layer
    pub request_timeout: Duration,

    /// Append delegate failure details to replies
    pub diagnostics: bool,

    /// JSON snapshot to serve instead of the built-in seed data
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            delegate: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            diagnostics: false,
            snapshot_path: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment, loading `.env` first
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let delegate = var("GEMINI_API_KEY")
            .or_else(|| var("GOOGLE_API_KEY"))
            .map(|api_key| DelegateConfig {
                api_key,
                model: var("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: var("ASSISTANT_DELEGATE_URL")
                    .unwrap_or_else(|| DEFAULT_DELEGATE_URL.to_string()),
            });

        let request_timeout = match var("ASSISTANT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("ASSISTANT_REQUEST_TIMEOUT_SECS is not a number: {raw}"))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let diagnostics = match var("ASSISTANT_DIAGNOSTICS") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("ASSISTANT_DIAGNOSTICS is not a boolean: {raw}"))?,
            None => false,
        };

        Ok(AppConfig {
            delegate,
            bind_addr: var("ASSISTANT_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            request_timeout,
            diagnostics,
            snapshot_path: var("ASSISTANT_SNAPSHOT").map(PathBuf::from),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_key() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.delegate.is_none());
    }

    #[test]
    fn test_blank_key_means_not_configured() {
        let cfg = config(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(cfg.delegate.is_none());
    }

    #[test]
    fn test_delegate_settings() {
        let cfg = config(&[
            ("GOOGLE_API_KEY", "abc"),
            ("ASSISTANT_MODEL", "gemini-2.0-flash"),
            ("ASSISTANT_DELEGATE_URL", "http://localhost:9999"),
        ])
        .unwrap();

        let delegate = cfg.delegate.unwrap();
        assert_eq!(delegate.api_key, "abc");
        assert_eq!(delegate.model, "gemini-2.0-flash");
        assert_eq!(delegate.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_server_settings() {
        let cfg = config(&[
            ("ASSISTANT_BIND", "127.0.0.1:8080"),
            ("ASSISTANT_REQUEST_TIMEOUT_SECS", "5"),
            ("ASSISTANT_DIAGNOSTICS", "Yes"),
            ("ASSISTANT_SNAPSHOT", "data/snapshot.json"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert!(cfg.diagnostics);
        assert_eq!(cfg.snapshot_path, Some(PathBuf::from("data/snapshot.json")));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config(&[("ASSISTANT_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("ASSISTANT_DIAGNOSTICS", "maybe")]).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cfg = DelegateConfig {
            api_key: "secret-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_DELEGATE_URL.to_string(),
        };
        assert!(!format!("{:?}", cfg).contains("secret-key"));
    }
}

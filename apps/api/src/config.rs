use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::advisor::session::MAX_SESSIONS;

/// Application configuration loaded from environment variables.
/// Everything except `PORT` is optional; missing integrations degrade at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    /// Second place to look for the hospice knowledge base.
    pub hospice_fallback_dir: PathBuf,
    pub google_api_key: Option<String>,
    pub smtp: Option<SmtpConfig>,
    /// Hospice chat sessions held in memory at once.
    pub max_sessions: usize,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp = match (
            get("SMTP_HOST"),
            get("SMTP_USERNAME"),
            get("SMTP_PASSWORD"),
            get("MAIL_FROM"),
        ) {
            (Some(host), Some(username), Some(password), Some(from)) => Some(SmtpConfig {
                host,
                port: parse_port(get("SMTP_PORT"), 587, "SMTP_PORT")?,
                username,
                password,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            port: parse_port(get("PORT"), 8080, "PORT")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            hospice_fallback_dir: get("HOSPICE_FALLBACK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            google_api_key: get("GOOGLE_API_KEY"),
            smtp,
            max_sessions: match get("MAX_SESSIONS") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .context("MAX_SESSIONS must be a positive integer")?,
                None => MAX_SESSIONS,
            },
        })
    }
}

fn parse_port(value: Option<String>, default: u16, key: &str) -> Result<u16> {
    match value {
        Some(v) => v
            .trim()
            .parse::<u16>()
            .with_context(|| format!("{key} must be a valid port number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.hospice_fallback_dir, PathBuf::from("."));
        assert!(config.google_api_key.is_none());
        assert!(config.smtp.is_none());
        assert_eq!(config.max_sessions, MAX_SESSIONS);
    }

    #[test]
    fn test_max_sessions_override() {
        let config = config_from(&[("MAX_SESSIONS", "50")]).unwrap();
        assert_eq!(config.max_sessions, 50);
        assert!(config_from(&[("MAX_SESSIONS", "0")]).is_err());
        assert!(config_from(&[("MAX_SESSIONS", "many")]).is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        let config = config_from(&[("GOOGLE_API_KEY", "  ")]).unwrap();
        assert!(config.google_api_key.is_none());
    }

    #[test]
    fn test_smtp_requires_all_fields() {
        let partial = config_from(&[("SMTP_HOST", "smtp.example.com")]).unwrap();
        assert!(partial.smtp.is_none());

        let full = config_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USERNAME", "bot"),
            ("SMTP_PASSWORD", "secret"),
            ("MAIL_FROM", "照護顧問 <bot@example.com>"),
        ])
        .unwrap();
        let smtp = full.smtp.unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.host, "smtp.example.com");
    }
}

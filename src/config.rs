use std::env;

use crate::backend::BackendConfig;
use crate::models::poll::DEFAULT_ATTENDANCE_QUESTION;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub backend: BackendConfig,
    /// Poll question whose answers count people behind a connection.
    pub attendance_question: String,
    /// Cookie signing key material; `None` means generate one per start.
    pub session_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1:8090".to_string(),
            backend: BackendConfig::default(),
            attendance_question: DEFAULT_ATTENDANCE_QUESTION.to_string(),
            session_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env loaded: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(url) = get("BACKEND_BASE_URL") {
            config.backend.base_url = url;
        }
        match get("BACKEND_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => config.backend.timeout_secs = secs,
            Some(_) => log::warn!(
                "BACKEND_TIMEOUT_SECS invalid, keeping {}s",
                config.backend.timeout_secs
            ),
            None => {}
        }
        if let Some(question) = get("ATTENDANCE_QUESTION").filter(|q| !q.trim().is_empty()) {
            config.attendance_question = question;
        }
        config.session_key = get("SESSION_KEY");

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.bind_addr, "127.0.0.1:8090");
        assert_eq!(config.backend.base_url, "http://localhost:8080/api");
        assert_eq!(config.attendance_question, DEFAULT_ATTENDANCE_QUESTION);
    }

    #[test]
    fn overrides() {
        let vars = HashMap::from([
            ("BACKEND_BASE_URL", "https://backend.example/api"),
            ("BACKEND_TIMEOUT_SECS", "zero"),
            ("ATTENDANCE_QUESTION", "How many?"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.backend.base_url, "https://backend.example/api");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.attendance_question, "How many?");
    }
}

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub downstream_url: String,
    pub downstream_timeout_ms: u64,
    pub allow_ready_toggle: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: var_or("PORT", "8080").parse()?,
            downstream_url: var_or("DOWNSTREAM_URL", "https://httpbin.org/status/200"),
            downstream_timeout_ms: var_or("DOWNSTREAM_TIMEOUT_MS", "1500").parse()?,
            allow_ready_toggle: var_or("ALLOW_READY_TOGGLE", "true").parse()?,
            log_level: var_or("RUST_LOG", "info"),
        })
    }

    pub fn downstream_timeout(&self) -> Duration {
        Duration::from_millis(self.downstream_timeout_ms)
    }
}

/// Read `key`, falling back to `default` when it is unset or empty
fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

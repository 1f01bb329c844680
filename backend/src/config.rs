use std::time::Duration;

use anyhow::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub roster_api_url: String,
    pub roster_api_timeout: Duration,
    pub session_ttl: Duration,
    pub listen_addr: String,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let roster_api_url = get("ROSTER_API_URL").context("ROSTER_API_URL must be set")?;
        if !(roster_api_url.starts_with("http://") || roster_api_url.starts_with("https://")) {
            anyhow::bail!("ROSTER_API_URL must be an http(s) URL, got {roster_api_url:?}");
        }

        let timeout_secs: u64 = get("ROSTER_API_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .parse()
            .context("ROSTER_API_TIMEOUT_SECS must be a number")?;

        let session_ttl_secs: u64 = get("SESSION_TTL_SECS")
            .unwrap_or_else(|| "28800".into())
            .parse()
            .context("SESSION_TTL_SECS must be a number")?;

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") | Some("") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got {other:?}"),
        };

        Ok(Self {
            roster_api_url,
            roster_api_timeout: Duration::from_secs(timeout_secs),
            session_ttl: Duration::from_secs(session_ttl_secs),
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into()),
            cors_origins: get("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            log_format,
        })
    }
}

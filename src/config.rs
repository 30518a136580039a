//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    // === Upstream Projections API ===
    /// Projections endpoint URL.
    #[serde(default = "default_projections_url")]
    pub projections_url: String,

    /// `User-Agent` sent upstream. The API rejects blank agents.
    #[serde(default = "default_user_agent")]
    pub upstream_user_agent: String,

    /// `Accept` header sent upstream.
    #[serde(default = "default_accept")]
    pub upstream_accept: String,

    /// `Referer` header sent upstream.
    #[serde(default = "default_referer")]
    pub upstream_referer: String,

    /// Outbound request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Projections requested per call.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_projections_url() -> String {
    "https://api.prizepicks.com/projections".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36"
        .to_string()
}

fn default_accept() -> String {
    "application/json, text/plain, */*".to_string()
}

fn default_referer() -> String {
    "https://www.prizepicks.com/".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_per_page() -> u32 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
            metrics_enabled: default_true(),
            projections_url: default_projections_url(),
            upstream_user_agent: default_user_agent(),
            upstream_accept: default_accept(),
            upstream_referer: default_referer(),
            http_timeout_ms: default_http_timeout_ms(),
            per_page: default_per_page(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.per_page == 0 {
            return Err("PER_PAGE must be greater than 0".to_string());
        }

        let url = Url::parse(&self.projections_url)
            .map_err(|e| format!("PROJECTIONS_URL is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("PROJECTIONS_URL must use http or https".to_string());
        }

        Ok(())
    }

    /// Outbound request timeout.
    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.http_timeout_ms)
    }
}

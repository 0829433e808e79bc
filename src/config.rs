use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_API_URL: &str = "http://localhost:8084/api/stock";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint of the inventory backend, e.g. `http://localhost:8084/api/stock`.
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
    /// How long a transient message stays on screen.
    pub message_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let message_ttl_ms: u64 = std::env::var("MESSAGE_TTL_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("MESSAGE_TTL_MS must be a number of milliseconds")?;

        Ok(Self {
            api_base_url: std::env::var("STOCK_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "4200".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            message_ttl: Duration::from_millis(message_ttl_ms),
        })
    }
}

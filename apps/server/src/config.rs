use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use twse_market_data::provider::mis_twse::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CACHE_TTL_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    /// Shared secret expected in `?token=`. `None` disables the check.
    pub token: Option<String>,
    pub listen_addr: SocketAddr,
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub cache_ttl: Duration,
    pub cors_allow: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: DEFAULT_TIMEOUT,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cors_allow: vec!["*".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Compared verbatim; trimming only decides whether it is blank
        let token = lookup("TWSE_PROXY_TOKEN").filter(|t| !t.trim().is_empty());

        let listen_addr = match lookup("TWSE_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid TWSE_LISTEN_ADDR: {addr}"))?,
            None => {
                let port = match lookup("PORT") {
                    Some(port) => port
                        .trim()
                        .parse::<u16>()
                        .with_context(|| format!("Invalid PORT: {port}"))?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let upstream_base_url =
            lookup("TWSE_UPSTREAM_URL").unwrap_or(defaults.upstream_base_url);

        let upstream_timeout = match lookup("TWSE_UPSTREAM_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .with_context(|| format!("Invalid TWSE_UPSTREAM_TIMEOUT_MS: {ms}"))?,
            ),
            None => defaults.upstream_timeout,
        };

        let cache_ttl = match lookup("TWSE_CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .with_context(|| format!("Invalid TWSE_CACHE_TTL_SECS: {secs}"))?,
            ),
            None => defaults.cache_ttl,
        };

        let cors_allow = lookup("TWSE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            token,
            listen_addr,
            upstream_base_url,
            upstream_timeout,
            cache_ttl,
            cors_allow,
        })
    }
}

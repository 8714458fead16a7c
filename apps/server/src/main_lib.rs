use std::sync::Arc;

use crate::{
    cache::{Clock, SystemClock, TtlCache},
    config::Config,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use twse_market_data::{MisTwseProvider, QuoteSource};

pub struct AppState {
    /// Required `?token=` value; `None` disables the check.
    pub token: Option<String>,
    pub quote_source: Arc<dyn QuoteSource>,
    pub cache: TtlCache,
}

impl AppState {
    pub fn new(config: &Config, quote_source: Arc<dyn QuoteSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            token: config.token.clone(),
            quote_source,
            cache: TtlCache::new(config.cache_ttl, clock),
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("TWSE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = MisTwseProvider::new(&config.upstream_base_url, config.upstream_timeout)?;
    tracing::info!(
        upstream = %config.upstream_base_url,
        timeout_ms = config.upstream_timeout.as_millis() as u64,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        auth = config.token.is_some(),
        "Quote proxy configured"
    );

    Ok(Arc::new(AppState::new(
        config,
        Arc::new(provider),
        Arc::new(SystemClock),
    )))
}

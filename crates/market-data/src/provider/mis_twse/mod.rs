//! mis.twse.com.tw realtime index provider.
//!
//! Calls `getStockInfo.jsp` for the TAIEX (`t00.tw`) and OTC (`o00.tw`)
//! channels in one request. The endpoint rejects requests that do not look
//! like they come from its own web page, hence the fixed browser headers.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::RawPayload;
use crate::provider::QuoteSource;

pub const DEFAULT_BASE_URL: &str = "https://mis.twse.com.tw";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const PROVIDER_ID: &str = "MIS_TWSE";
const STOCK_INFO_PATH: &str = "/stock/api/getStockInfo.jsp";
const CHANNELS: &str = "t00.tw|o00.tw";

const REFERER_VALUE: &str = "https://mis.twse.com.tw/stock/index.jsp";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";
const ACCEPT_VALUE: &str = "application/json,text/javascript,*/*;q=0.01";

/// Upper bound on the error body kept from a non-2xx response.
const MAX_ERROR_BODY_BYTES: usize = 256;

/// Realtime index quotes from the TWSE market information system.
pub struct MisTwseProvider {
    client: Client,
    base_url: String,
}

impl MisTwseProvider {
    /// Create a provider against `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for the given cache-busting timestamp.
    fn stock_info_url(&self, timestamp_ms: i64) -> String {
        format!(
            "{}{}?ex_ch={}&json=1&delay=0&_={}",
            self.base_url, STOCK_INFO_PATH, CHANNELS, timestamp_ms
        )
    }

    fn transport_error(e: reqwest::Error, context: &str) -> MarketDataError {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("{}: {}", context, e),
            }
        }
    }
}

/// Cuts `body` to at most [`MAX_ERROR_BODY_BYTES`] on a char boundary.
fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[async_trait]
impl QuoteSource for MisTwseProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self) -> Result<RawPayload, MarketDataError> {
        let url = self.stock_info_url(Utc::now().timestamp_millis());
        debug!("MIS TWSE request: {}", url);

        let response = self
            .client
            .get(&url)
            .header(REFERER, REFERER_VALUE)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await
            .map_err(|e| Self::transport_error(e, "Request failed"))?;

        let status = response.status();
        debug!("MIS TWSE response status: {}", status);

        if !status.is_success() {
            let body = truncate_body(&response.text().await.unwrap_or_default());
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(e, "Failed to read response"))?;

        if text.trim().is_empty() {
            warn!("MIS TWSE returned an empty body");
            return Ok(RawPayload::empty_response());
        }

        serde_json::from_str::<RawPayload>(&text).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = MisTwseProvider::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(provider.id(), "MIS_TWSE");
    }

    #[test]
    fn test_stock_info_url() {
        let provider = MisTwseProvider::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            provider.stock_info_url(1_700_000_000_000),
            "https://mis.twse.com.tw/stock/api/getStockInfo.jsp?ex_ch=t00.tw|o00.tw&json=1&delay=0&_=1700000000000"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = MisTwseProvider::new("http://127.0.0.1:9000/", DEFAULT_TIMEOUT).unwrap();
        assert!(provider
            .stock_info_url(1)
            .starts_with("http://127.0.0.1:9000/stock/api/getStockInfo.jsp?"));
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("  maintenance\n"), "maintenance");

        let long = "x".repeat(1000);
        let cut = truncate_body(&long);
        assert_eq!(cut.len(), MAX_ERROR_BODY_BYTES + 3);
        assert!(cut.ends_with("..."));

        // Multi-byte chars straddling the limit are dropped whole
        let wide = "臺".repeat(200);
        let cut = truncate_body(&wide);
        assert!(cut.len() <= MAX_ERROR_BODY_BYTES + 3);
        assert!(cut.trim_end_matches("...").chars().all(|c| c == '臺'));
    }
}

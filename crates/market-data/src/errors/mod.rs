//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every way a single upstream fetch can fail.
//! An empty upstream body is deliberately *not* an error: it is reported
//! through [`RawPayload::empty_response`](crate::models::RawPayload::empty_response).

use thiserror::Error;

/// Errors that can occur while fetching quotes from the upstream.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status} from {provider}: {body}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The connection could not be established or the body could not be read.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that failed
        provider: String,
        /// Description of the transport failure
        message: String,
    },

    /// The provider returned a body that is not the expected JSON shape.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the body
        provider: String,
        /// The parser error
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// True when the upstream answered but the payload could not be parsed.
    ///
    /// Everything else means the upstream was unavailable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

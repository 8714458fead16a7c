//! TWSE Market Data Crate
//!
//! Fetches realtime index quotes from mis.twse.com.tw and normalizes them
//! into the shape served by the proxy.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  MisTwseProvider | --> |   RawPayload     | --> |    normalize     |
//! |  (QuoteSource)   |     |   (msgArray)     |     |                  |
//! +------------------+     +------------------+     +------------------+
//!                                                            |
//!                                                            v
//!                                                   +------------------+
//!                                                   |   IndexQuotes    |
//!                                                   | (taiex / otc)    |
//!                                                   +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`QuoteSource`] - One upstream fetch per call
//! - [`RawPayload`] - Decoded upstream body, or the empty-response sentinel
//! - [`NormalizedQuote`] - One index after fallback and change computation
//! - [`ResponseEnvelope`] - JSON body served to clients

pub mod errors;
pub mod models;
pub mod normalizer;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    IndexQuotes, NormalizedQuote, RawPayload, RawQuoteItem, ResponseEnvelope,
    EMPTY_RESPONSE_MARKER, OTC_CODE, SOURCE_NAME, TAIEX_CODE,
};
pub use normalizer::normalize;
pub use provider::{MisTwseProvider, QuoteSource};

//! Quote source trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::RawPayload;

/// Something that can produce one raw upstream payload per call.
///
/// The proxy depends on this trait rather than on [`MisTwseProvider`](super::MisTwseProvider)
/// directly so that handlers can be exercised against a scripted source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Unique identifier for this source, used in errors and logs.
    fn id(&self) -> &'static str;

    /// Performs a single fetch. No retries.
    ///
    /// A blank upstream body is returned as [`RawPayload::empty_response`],
    /// not as an error.
    async fn fetch(&self) -> Result<RawPayload, MarketDataError>;
}

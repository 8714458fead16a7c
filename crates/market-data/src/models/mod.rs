//! Market data models
//!
//! - `raw` - Upstream JSON shapes (RawPayload, RawQuoteItem)
//! - `quote` - Normalized output (NormalizedQuote, IndexQuotes, ResponseEnvelope)
//! - `types` - Symbol codes and fixed markers

mod quote;
mod raw;
mod types;

pub use quote::{IndexQuotes, NormalizedQuote, ResponseEnvelope};
pub use raw::{RawPayload, RawQuoteItem};
pub use types::{EMPTY_RESPONSE_MARKER, OTC_CODE, SOURCE_NAME, TAIEX_CODE};

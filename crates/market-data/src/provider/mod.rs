//! Upstream quote sources.
//!
//! - The `QuoteSource` trait the proxy is written against
//! - `MisTwseProvider`, the mis.twse.com.tw implementation

mod traits;

pub mod mis_twse;

pub use mis_twse::MisTwseProvider;
pub use traits::QuoteSource;

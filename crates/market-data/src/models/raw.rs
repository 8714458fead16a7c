use serde::Deserialize;
use serde_json::Value;

use super::types::EMPTY_RESPONSE_MARKER;

/// One entry of the upstream `msgArray`.
///
/// Fields are kept as raw JSON values because the upstream mixes strings,
/// numbers and placeholders like `"-"` for the same key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawQuoteItem {
    /// Symbol code (`t00`, `o00`, ...)
    #[serde(default)]
    pub c: Option<Value>,
    /// Display name
    #[serde(default)]
    pub n: Option<Value>,
    /// Last traded price
    #[serde(default)]
    pub z: Option<Value>,
    /// Previous close
    #[serde(default)]
    pub y: Option<Value>,
    /// Accumulated volume
    #[serde(default)]
    pub v: Option<Value>,
    /// Time of day, `HH:MM:SS`
    #[serde(default)]
    pub t: Option<Value>,
    /// Trade date, `YYYYMMDD`
    #[serde(default)]
    pub d: Option<Value>,
    /// Epoch milliseconds of the quote
    #[serde(default)]
    pub tlong: Option<Value>,
}

impl RawQuoteItem {
    /// The symbol code when it is a string.
    pub fn code(&self) -> Option<&str> {
        self.c.as_ref().and_then(Value::as_str)
    }
}

/// Body of `getStockInfo.jsp` after JSON decoding.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPayload {
    #[serde(rename = "msgArray", default)]
    pub msg_array: Vec<RawQuoteItem>,

    /// Degraded-upstream marker, never present on the wire.
    #[serde(skip)]
    pub marker: Option<String>,
}

impl RawPayload {
    /// Sentinel returned when the upstream body is blank.
    pub fn empty_response() -> Self {
        Self {
            msg_array: Vec::new(),
            marker: Some(EMPTY_RESPONSE_MARKER.to_string()),
        }
    }
}

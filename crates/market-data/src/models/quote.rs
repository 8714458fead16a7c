use serde::{Deserialize, Serialize};

use super::types::SOURCE_NAME;

/// A single index quote after normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    /// Upstream symbol code (`t00` / `o00`)
    pub symbol: String,

    /// Display name, when the upstream sent one
    pub name: Option<String>,

    /// Last price, 0.0 when unparsable
    pub price: f64,

    /// `price - previous close`, 0.0 when there is no previous close
    pub change: f64,

    /// Change as a percentage of the previous close
    pub percent: f64,

    /// Accumulated volume, 0.0 when unparsable
    pub volume: f64,

    /// Quote time, `YYYY-MM-DD HH:MM:SS` or the upstream date/time parts
    pub time: String,
}

/// The two indices extracted from one upstream payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexQuotes {
    pub taiex: Option<NormalizedQuote>,
    pub otc: Option<NormalizedQuote>,
}

/// JSON body served by the proxy.
///
/// `taiex` and `otc` are always present (possibly `null`); `from` and
/// `error` are omitted when unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub taiex: Option<NormalizedQuote>,
    pub otc: Option<NormalizedQuote>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Envelope for a completed upstream fetch.
    ///
    /// `marker` is the degraded-upstream marker, if any.
    pub fn fetched(quotes: IndexQuotes, marker: Option<String>) -> Self {
        Self {
            taiex: quotes.taiex,
            otc: quotes.otc,
            from: Some(SOURCE_NAME.to_string()),
            error: marker,
        }
    }

    /// Envelope for a failed fetch. No `from` field.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            taiex: None,
            otc: None,
            from: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_quote() -> NormalizedQuote {
        NormalizedQuote {
            symbol: "t00".to_string(),
            name: None,
            price: 17000.5,
            change: 50.5,
            percent: 0.2979,
            volume: 12345.0,
            time: "2023-11-14 22:13:20".to_string(),
        }
    }

    #[test]
    fn test_fetched_envelope_serialization() {
        let envelope = ResponseEnvelope::fetched(
            IndexQuotes {
                taiex: Some(sample_quote()),
                otc: None,
            },
            None,
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["from"], "mis.twse.com.tw");
        assert_eq!(value["otc"], json!(null));
        assert_eq!(value["taiex"]["name"], json!(null));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_empty_response_envelope_serialization() {
        let envelope =
            ResponseEnvelope::fetched(IndexQuotes::default(), Some("empty_response".to_string()));

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "taiex": null,
                "otc": null,
                "from": "mis.twse.com.tw",
                "error": "empty_response"
            })
        );
    }

    #[test]
    fn test_failure_envelope_has_no_source() {
        let value = serde_json::to_value(ResponseEnvelope::failure("Timeout: MIS_TWSE")).unwrap();
        assert_eq!(
            value,
            json!({ "taiex": null, "otc": null, "error": "Timeout: MIS_TWSE" })
        );
    }
}

//! Maps the raw `getStockInfo.jsp` payload into [`IndexQuotes`].
//!
//! The upstream is loose about types: prices arrive as strings, numbers or
//! `"-"` placeholders. Every numeric field falls back to `0.0` instead of
//! failing, and `change`/`percent` collapse to `0.0` when there is no usable
//! previous close.

use chrono::{Local, TimeZone};
use serde_json::Value;
use tracing::trace;

use crate::models::{IndexQuotes, NormalizedQuote, RawPayload, RawQuoteItem, OTC_CODE, TAIEX_CODE};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Picks the TAIEX and OTC entries out of `payload` and normalizes them.
///
/// The first entry per symbol code wins. A missing index yields `None`.
pub fn normalize(payload: &RawPayload) -> IndexQuotes {
    let mut taiex_raw: Option<&RawQuoteItem> = None;
    let mut otc_raw: Option<&RawQuoteItem> = None;

    for item in &payload.msg_array {
        match item.code() {
            Some(TAIEX_CODE) if taiex_raw.is_none() => taiex_raw = Some(item),
            Some(OTC_CODE) if otc_raw.is_none() => otc_raw = Some(item),
            _ => {}
        }
    }

    trace!(
        items = payload.msg_array.len(),
        taiex = taiex_raw.is_some(),
        otc = otc_raw.is_some(),
        "Scanned msgArray"
    );

    IndexQuotes {
        taiex: taiex_raw.map(normalize_item),
        otc: otc_raw.map(normalize_item),
    }
}

/// Normalizes a single upstream entry.
pub fn normalize_item(raw: &RawQuoteItem) -> NormalizedQuote {
    let price = lenient_f64(raw.z.as_ref());
    let previous_close = lenient_f64(raw.y.as_ref());

    let (change, percent) = if previous_close != 0.0 {
        let change = price - previous_close;
        (change, change / previous_close * 100.0)
    } else {
        (0.0, 0.0)
    };

    NormalizedQuote {
        symbol: raw.code().unwrap_or_default().to_string(),
        name: raw.n.as_ref().and_then(Value::as_str).map(str::to_string),
        price,
        change,
        percent,
        volume: lenient_f64(raw.v.as_ref()),
        time: quote_time(raw),
    }
}

/// Parses a loosely typed JSON value as a float, `0.0` on anything unusable.
pub fn lenient_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    // NaN and infinities cannot be represented in the JSON response
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Renders the quote time from `tlong`, falling back to the `d`/`t` parts.
fn quote_time(raw: &RawQuoteItem) -> String {
    if let Some(formatted) = raw
        .tlong
        .as_ref()
        .filter(|v| is_truthy(v))
        .and_then(epoch_millis)
        .and_then(format_local_millis)
    {
        return formatted;
    }

    let date = text_part(raw.d.as_ref());
    let time = text_part(raw.t.as_ref());
    format!("{} {}", date, time).trim().to_string()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn format_local_millis(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(TIME_FORMAT).to_string())
}

fn text_part(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Symbol code of the TAIEX weighted index in `msgArray`.
pub const TAIEX_CODE: &str = "t00";

/// Symbol code of the TPEx over-the-counter index in `msgArray`.
pub const OTC_CODE: &str = "o00";

/// Value of the `from` field on every envelope built from a fetch.
pub const SOURCE_NAME: &str = "mis.twse.com.tw";

/// Marker carried by the envelope when the upstream answered with an empty body.
pub const EMPTY_RESPONSE_MARKER: &str = "empty_response";

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::debug;

use crate::{error::ApiError, main_lib::AppState};

/// Extracts the first `token` query parameter, if any.
fn query_token(request: &Request<Body>) -> Option<String> {
    let query = request.uri().query()?;
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .ok()?
        .into_iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value)
}

/// Rejects requests whose `?token=` does not match the configured secret.
///
/// With no secret configured every request passes.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(next.run(request).await);
    };

    if query_token(&request).as_deref() != Some(expected) {
        debug!(path = %request.uri().path(), "Rejected request with missing or bad token");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_query_token() {
        assert_eq!(
            query_token(&request("/twse/realtime?token=abc")).as_deref(),
            Some("abc")
        );
        assert_eq!(
            query_token(&request("/twse/realtime?x=1&token=a%20b")).as_deref(),
            Some("a b")
        );
        assert_eq!(query_token(&request("/twse/realtime?token=")).as_deref(), Some(""));
        assert_eq!(query_token(&request("/twse/realtime")), None);
        assert_eq!(query_token(&request("/twse/realtime?other=1")), None);
    }

    #[test]
    fn test_repeated_token_takes_first() {
        assert_eq!(
            query_token(&request("/twse/realtime?token=abc&token=zzz")).as_deref(),
            Some("abc")
        );
        assert_eq!(
            query_token(&request("/twse/realtime?token=&token=abc")).as_deref(),
            Some("")
        );
    }
}

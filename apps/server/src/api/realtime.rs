use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, error};
use twse_market_data::{normalize, ResponseEnvelope};

use crate::{error::ApiResult, main_lib::AppState};

/// Realtime TAIEX/OTC quotes, served from cache while fresh.
///
/// Failures are not cached: the slot keeps whatever it held before.
async fn get_realtime(State(state): State<Arc<AppState>>) -> ApiResult<Json<ResponseEnvelope>> {
    let now = state.cache.now();

    if let Some(cached) = state.cache.get().await {
        return Ok(Json(cached));
    }
    let previous = state.cache.stored_at().await;
    debug!(
        previous = ?previous,
        "Cache miss, fetching from {}",
        state.quote_source.id()
    );

    let payload = state.quote_source.fetch().await.map_err(|e| {
        error!(
            source = state.quote_source.id(),
            malformed = e.is_malformed(),
            "proxy twse_realtime error: {}",
            e
        );
        e
    })?;

    let quotes = normalize(&payload);
    let envelope = ResponseEnvelope::fetched(quotes, payload.marker);
    state.cache.put(envelope.clone(), now).await;

    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/twse/realtime", get(get_realtime))
}

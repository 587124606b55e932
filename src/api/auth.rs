use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret gate in front of every `/api` route.
///
/// Fail-closed: with no secret configured on the server, every request is
/// rejected. The rejection message never distinguishes a missing key from a
/// wrong one, and never hints at which secrets exist.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let server = &state.config.server;

    if !server.api_key_configured() {
        return Err(ApiError::unauthorized("Server missing API key configuration"));
    }

    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if server.accepts_api_key(key) => Ok(next.run(request).await),
        _ => Err(ApiError::unauthorized("Invalid or missing API key")),
    }
}

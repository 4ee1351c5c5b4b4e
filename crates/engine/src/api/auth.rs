//! Shared-secret authentication middleware.
//!
//! Every request except the health check must carry `X-API-Key` equal to the
//! configured key. The check runs in front of routing, so unknown paths and
//! unsupported methods are rejected with 401 as well.
//!
//! # Usage
//!
//! ```rust,ignore
//! let router = routes()
//!     .layer(middleware::from_fn_with_state(app.clone(), require_api_key))
//!     .with_state(app);
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use locatr_shared::UnauthorizedResponse;

use crate::app::App;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Paths reachable without a key.
const PUBLIC_PATHS: [&str; 1] = ["/v1/health"];

pub async fn require_api_key(State(app): State<Arc<App>>, request: Request, next: Next) -> Response {
    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let rejection = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) if keys_match(key, &app.config.api_key) => None,
        Some(_) => Some("invalid API key"),
        None => Some("missing API key"),
    };

    match rejection {
        None => next.run(request).await,
        Some(reason) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason,
                "Rejected unauthenticated request"
            );
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(UnauthorizedResponse::default())).into_response()
}

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn keys_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

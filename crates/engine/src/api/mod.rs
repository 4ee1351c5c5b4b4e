//! API layer - HTTP entry points.

pub mod auth;
pub mod error;
pub mod http;
pub mod pagination;

use std::sync::Arc;

use axum::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::app::App;
use crate::infrastructure::config::EngineConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The complete HTTP application: routes, key check, tracing, request ids
/// and CORS (outermost, so preflights never need a key).
pub fn router(app: Arc<App>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let cors = cors_layer(&app.config);

    http::routes()
        .layer(middleware::from_fn_with_state(
            app.clone(),
            auth::require_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(app)
}

#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

fn cors_layer(config: &EngineConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // The client sends the key and JSON bodies, both of which trigger preflights.
        .allow_headers([
            HeaderName::from_static("x-api-key"),
            CONTENT_TYPE,
            ACCEPT,
        ]);

    match config.cors_allowed_origin.as_deref() {
        None => cors.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(origin) => cors.allow_origin(origin),
            Err(e) => {
                tracing::warn!(origin, error = %e, "Invalid CORS origin, allowing any");
                cors.allow_origin(Any)
            }
        },
    }
}

//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use locatr_domain::{Location, LocationId};
use locatr_shared::{
    AuthResponse, DataResponse, ErrorCode, HealthResponse, ListResponse, LocationData,
    LocationPayload, MessageResponse,
};
use serde::Deserialize;

use crate::api::error::{ApiError, LOCATION_NOT_FOUND};
use crate::api::pagination::{page_links, page_meta};
use crate::app::App;
use crate::infrastructure::ports::LocationFilter;
use crate::use_cases::{FieldErrors, LocationError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/auth", post(auth))
        .route("/v1/locations", get(list_locations).post(create_location))
        .route(
            "/v1/locations/{id}",
            get(show_location)
                .put(update_location)
                .patch(update_location)
                .delete(delete_location),
        )
        .fallback(not_found)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Locatr API is running".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Reached only with a valid key; the middleware answers everything else.
async fn auth() -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        message: "Authentication successful".to_string(),
        authenticated: true,
    })
}

async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::failed("Not found")))
}

// =============================================================================
// Locations
// =============================================================================

/// Raw list parameters; numbers are parsed by hand so a bad value becomes a
/// field error instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    name: Option<String>,
    code: Option<String>,
    page: Option<String>,
    per_page: Option<String>,
}

async fn list_locations(
    State(app): State<Arc<App>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse<LocationData>>, ApiError> {
    let Query(params) =
        params.map_err(|e| ApiError::Invalid(FieldErrors::single("query", e.body_text())))?;

    let mut errors = FieldErrors::new();
    let page = parse_integer(&mut errors, "page", params.page.as_deref());
    let per_page = parse_integer(&mut errors, "per_page", params.per_page.as_deref());
    let (page, per_page) = errors.into_result((page, per_page))?;

    let request = app.locations.page_request(page, per_page)?;
    let filter = LocationFilter::new(params.name, params.code);

    let page = app
        .locations
        .get_paginated_locations(&filter, request)
        .await
        .map_err(|e| retrieval_error(&app, e, "Error retrieving locations"))?;

    tracing::debug!(
        total = page.total,
        page = request.page(),
        per_page = request.per_page(),
        "Listed locations"
    );

    let base = format!("{}/v1/locations", app.config.public_url);
    Ok(Json(ListResponse {
        success: true,
        message: "Locations retrieved successfully".to_string(),
        meta: page_meta(&page),
        links: page_links(&base, &filter, &page),
        data: page.items.iter().map(LocationData::from).collect(),
    }))
}

async fn create_location(
    State(app): State<Arc<App>>,
    payload: Result<Json<LocationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<LocationData>>), ApiError> {
    let Json(payload) = payload.map_err(body_error)?;

    let location = app.locations.create_location(payload).await.map_err(|e| {
        ApiError::from_location(
            e,
            ErrorCode::CreationError,
            "Error creating location",
            app.config.app_debug,
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(
            "Location created successfully",
            LocationData::from(location),
        )),
    ))
}

async fn show_location(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<LocationData>>, ApiError> {
    let location = find(&app, &id, |app, e| {
        retrieval_error(app, e, "Error retrieving location")
    })
    .await?;

    Ok(Json(DataResponse::ok(
        "Location retrieved successfully",
        LocationData::from(location),
    )))
}

async fn update_location(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    payload: Result<Json<LocationPayload>, JsonRejection>,
) -> Result<Json<DataResponse<LocationData>>, ApiError> {
    let update_error = |app: &App, e: LocationError| {
        ApiError::from_location(
            e,
            ErrorCode::UpdateError,
            "Error updating location",
            app.config.app_debug,
        )
    };

    let location = find(&app, &id, update_error).await?;
    let Json(payload) = payload.map_err(body_error)?;

    let updated = app
        .locations
        .update_location(&location, payload)
        .await
        .map_err(|e| update_error(&*app, e))?;

    Ok(Json(DataResponse::ok(
        "Location updated successfully",
        LocationData::from(updated),
    )))
}

async fn delete_location(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deletion_error = |app: &App, e: LocationError| {
        ApiError::from_location(
            e,
            ErrorCode::DeletionError,
            "Error deleting location",
            app.config.app_debug,
        )
    };

    let location = find(&app, &id, deletion_error).await?;
    app.locations
        .delete_location(&location)
        .await
        .map_err(|e| deletion_error(&*app, e))?;

    Ok(Json(MessageResponse::ok("Location deleted successfully")))
}

// =============================================================================
// Helpers
// =============================================================================

/// Load the location named by a path segment. Ids that do not parse cannot
/// exist, so they are reported as not found.
async fn find(
    app: &App,
    raw_id: &str,
    on_error: impl Fn(&App, LocationError) -> ApiError,
) -> Result<Location, ApiError> {
    let id: LocationId = raw_id
        .parse()
        .map_err(|_| ApiError::NotFound(LOCATION_NOT_FOUND.to_string()))?;

    app.locations
        .find_location(id)
        .await
        .map_err(|e| on_error(app, e))?
        .ok_or_else(|| ApiError::NotFound(LOCATION_NOT_FOUND.to_string()))
}

fn retrieval_error(app: &App, err: LocationError, message: &'static str) -> ApiError {
    ApiError::from_location(err, ErrorCode::RetrievalError, message, app.config.app_debug)
}

fn body_error(rejection: JsonRejection) -> ApiError {
    ApiError::Invalid(FieldErrors::single("body", rejection.body_text()))
}

/// Blank values count as absent.
fn parse_integer(errors: &mut FieldErrors, field: &'static str, raw: Option<&str>) -> Option<i64> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("The {} must be an integer.", field.replace('_', " ")));
            None
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

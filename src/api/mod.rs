pub mod health;
pub mod map;
pub mod search;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PlaceError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Map state
        .route("/map", get(map::get_map))
        .route("/places", get(map::list_places))
        .route("/places/refresh", post(map::refresh_places))
        .route("/location", put(map::set_location))
        .route("/radius", put(map::set_radius))
        .route("/filters", put(map::set_filters))
        .route("/notice", delete(map::dismiss_notice))
        // Search
        .route("/search", post(search::search))
        .route("/search/select/:id", post(search::select_candidate))
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// JSON error body with a status matching the failure class.
pub(crate) fn error_response(error: &PlaceError) -> Response {
    let status = match error {
        PlaceError::InvalidRadius(_) => StatusCode::BAD_REQUEST,
        PlaceError::UnknownCandidate(_) | PlaceError::SearchNotFound => StatusCode::NOT_FOUND,
        PlaceError::FetchFailed(_) | PlaceError::SearchFailed(_) => StatusCode::BAD_GATEWAY,
        PlaceError::LocationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(ErrorResponse::new(error.user_message()))).into_response()
}

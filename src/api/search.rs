use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::map::RelocationResponse;
use super::{ErrorResponse, error_response};
use crate::infrastructure::AppState;
use crate::services::SearchOutcome;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

#[utoipa::path(
    post,
    path = "/api/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Resolved to a position, or several candidates to choose from", body = SearchOutcome),
        (status = 404, description = "Place not found", body = ErrorResponse),
        (status = 502, description = "Geocoding failed", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> impl IntoResponse {
    match state.map.search(&payload.query).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/api/search/select/{id}",
    params(("id" = String, Path, description = "Place id, e.g. node-123")),
    responses(
        (status = 200, description = "Map re-centred on the chosen place", body = RelocationResponse),
        (status = 404, description = "No pending candidate with this id", body = ErrorResponse)
    )
)]
pub async fn select_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.map.select_candidate(&id).await {
        Ok((position, refresh)) => (
            StatusCode::OK,
            Json(RelocationResponse { position, refresh }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

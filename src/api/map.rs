//! Map state endpoints consumed by the rendering layer.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ErrorResponse, error_response};
use crate::infrastructure::AppState;
use crate::models::Coordinate;
use crate::services::{CategoryFilters, MapSnapshot, PlaceMarker, RefreshOutcome};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RadiusRequest {
    pub radius: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlacesResponse {
    pub places: Vec<PlaceMarker>,
    pub total: usize,
    pub loading: bool,
}

/// Where the map now stands and what the follow-up fetch did.
#[derive(Debug, Serialize, ToSchema)]
pub struct RelocationResponse {
    pub position: Coordinate,
    pub refresh: RefreshOutcome,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RadiusResponse {
    pub radius: u32,
    pub refresh: RefreshOutcome,
}

#[utoipa::path(
    get,
    path = "/api/map",
    responses(
        (status = 200, description = "Position, radius, loading flag, notice, candidates and visible places", body = MapSnapshot)
    )
)]
pub async fn get_map(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.map.snapshot().await)
}

#[utoipa::path(
    get,
    path = "/api/places",
    responses(
        (status = 200, description = "Visible places with their marker style, nearest first", body = PlacesResponse)
    )
)]
pub async fn list_places(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.map.snapshot().await;
    Json(PlacesResponse {
        total: snapshot.places.len(),
        places: snapshot.places,
        loading: snapshot.loading,
    })
}

#[utoipa::path(
    post,
    path = "/api/places/refresh",
    responses(
        (status = 200, description = "Refreshed, throttled, or no position yet", body = RefreshOutcome),
        (status = 502, description = "Places could not be loaded; previous list kept", body = RefreshOutcome)
    )
)]
pub async fn refresh_places(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state.map.refresh().await;
    let status = if matches!(outcome, RefreshOutcome::Failed { .. }) {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(outcome))
}

#[utoipa::path(
    put,
    path = "/api/location",
    request_body = Coordinate,
    responses(
        (status = 200, description = "Map re-centred", body = RelocationResponse),
        (status = 400, description = "Coordinate out of range", body = ErrorResponse)
    )
)]
pub async fn set_location(
    State(state): State<AppState>,
    Json(position): Json<Coordinate>,
) -> impl IntoResponse {
    if !position.is_valid() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Invalid coordinate {}", position))),
        )
            .into_response();
    }

    let refresh = state.map.relocate(position).await;
    (
        StatusCode::OK,
        Json(RelocationResponse { position, refresh }),
    )
        .into_response()
}

#[utoipa::path(
    put,
    path = "/api/radius",
    request_body = RadiusRequest,
    responses(
        (status = 200, description = "Radius updated", body = RadiusResponse),
        (status = 400, description = "Radius outside 1..=5000", body = ErrorResponse)
    )
)]
pub async fn set_radius(
    State(state): State<AppState>,
    Json(payload): Json<RadiusRequest>,
) -> impl IntoResponse {
    match state.map.change_radius(payload.radius).await {
        Ok(refresh) => (
            StatusCode::OK,
            Json(RadiusResponse {
                radius: payload.radius,
                refresh,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/api/filters",
    request_body = CategoryFilters,
    responses(
        (status = 200, description = "Visibility toggles updated", body = CategoryFilters)
    )
)]
pub async fn set_filters(
    State(state): State<AppState>,
    Json(filters): Json<CategoryFilters>,
) -> impl IntoResponse {
    state.map.set_filters(filters).await;
    Json(filters)
}

#[utoipa::path(
    delete,
    path = "/api/notice",
    responses(
        (status = 204, description = "Notice dismissed")
    )
)]
pub async fn dismiss_notice(State(state): State<AppState>) -> impl IntoResponse {
    state.map.dismiss_notice().await;
    StatusCode::NO_CONTENT
}

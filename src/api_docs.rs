use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::map::get_map,
        api::map::list_places,
        api::map::refresh_places,
        api::map::set_location,
        api::map::set_radius,
        api::map::set_filters,
        api::map::dismiss_notice,
        api::search::search,
        api::search::select_candidate,
    ),
    components(
        schemas(
            crate::models::Coordinate,
            crate::models::Category,
            crate::models::Place,
            crate::services::CategoryFilters,
            crate::services::DistanceTier,
            crate::services::MarkerStyle,
            crate::services::PlaceMarker,
            crate::services::NoticeKind,
            crate::services::Notice,
            crate::services::RefreshOutcome,
            crate::services::SearchOutcome,
            crate::services::MapSnapshot,
            api::ErrorResponse,
            api::map::RadiusRequest,
            api::map::PlacesResponse,
            api::map::RelocationResponse,
            api::map::RadiusResponse,
            api::search::SearchRequest,
        )
    ),
    tags(
        (name = "nearby-places", description = "Nearby places API")
    )
)]
pub struct ApiDoc;

//! Services Layer
//!
//! The place discovery pipeline: locating the user, fetching nearby places,
//! resolving searches and deciding what the map shows. Pure logic behind the
//! `domain` traits, called from the HTTP handlers and from `main`.

pub mod controller;
pub mod display;
pub mod fetcher;
pub mod locator;
pub mod resolver;

// Re-export for convenience
pub use controller::{
    MapController, MapSnapshot, Notice, NoticeKind, RefreshOutcome, SearchOutcome,
};
pub use display::{
    CategoryFilters, DistanceTier, MarkerStyle, PlaceMarker, marker_style, visible_places,
};
pub use fetcher::{PlaceFetcher, build_places};
pub use locator::{FALLBACK_POSITION, Locator, StaticPositionSource};
pub use resolver::{Resolution, Resolver};

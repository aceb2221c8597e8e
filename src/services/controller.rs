//! Map controller - the single owner of application state
//!
//! Every change goes through one of the transition methods below. The state
//! lock is never held across a network call: inputs are copied out, the
//! backend is called, and the result is applied under a fresh lock. A slow
//! fetch that completes after a newer one therefore still replaces the list.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::display::{CategoryFilters, PlaceMarker, visible_places};
use super::fetcher::{Fetch, PlaceFetcher};
use super::resolver::{Resolution, Resolver};
use crate::domain::PlaceError;
use crate::models::{Coordinate, Place};

pub const DEFAULT_RADIUS_METERS: u32 = 1000;
pub const MAX_RADIUS_METERS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    FetchFailed,
    SearchNotFound,
    SearchFailed,
}

/// Message the UI should show until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// Only failures the user can act on become notices.
    pub fn from_error(error: &PlaceError) -> Option<Self> {
        let kind = match error {
            PlaceError::FetchFailed(_) => NoticeKind::FetchFailed,
            PlaceError::SearchNotFound => NoticeKind::SearchNotFound,
            PlaceError::SearchFailed(_) => NoticeKind::SearchFailed,
            _ => return None,
        };
        Some(Self {
            kind,
            message: error.user_message(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MapState {
    pub position: Option<Coordinate>,
    pub radius_meters: u32,
    pub places: Arc<Vec<Place>>,
    pub filters: CategoryFilters,
    /// Pending ambiguous search matches
    pub candidates: Vec<Place>,
    pub notice: Option<Notice>,
}

impl MapState {
    pub fn new(radius_meters: u32) -> Self {
        Self {
            position: None,
            radius_meters,
            places: Arc::new(Vec::new()),
            filters: CategoryFilters::default(),
            candidates: Vec::new(),
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Updated { count: usize },
    Throttled,
    NoPosition,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Ignored,
    Resolved {
        position: Coordinate,
        refresh: RefreshOutcome,
    },
    Candidates { candidates: Vec<Place> },
}

/// Read-only view handed to the rendering layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapSnapshot {
    pub position: Option<Coordinate>,
    pub radius_meters: u32,
    pub loading: bool,
    pub last_fetch_at: Option<DateTime<Utc>>,
    pub notice: Option<Notice>,
    pub filters: CategoryFilters,
    pub candidates: Vec<Place>,
    pub total_places: usize,
    pub places: Vec<PlaceMarker>,
}

pub struct MapController {
    state: RwLock<MapState>,
    fetcher: PlaceFetcher,
    resolver: Resolver,
}

impl MapController {
    pub fn new(fetcher: PlaceFetcher, resolver: Resolver, radius_meters: u32) -> Self {
        Self {
            state: RwLock::new(MapState::new(radius_meters)),
            fetcher,
            resolver,
        }
    }

    /// Centre the map on `position` and fetch around it.
    pub async fn relocate(&self, position: Coordinate) -> RefreshOutcome {
        self.state.write().await.position = Some(position);
        tracing::info!("Map centred on {}", position);
        self.refresh().await
    }

    pub async fn change_radius(&self, radius_meters: u32) -> Result<RefreshOutcome, PlaceError> {
        if radius_meters == 0 || radius_meters > MAX_RADIUS_METERS {
            return Err(PlaceError::InvalidRadius(radius_meters));
        }
        self.state.write().await.radius_meters = radius_meters;
        Ok(self.refresh().await)
    }

    /// Fetch around the current position, subject to the rate limit.
    ///
    /// On failure the previous list is kept and a notice is raised.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (position, radius) = {
            let state = self.state.read().await;
            (state.position, state.radius_meters)
        };
        let Some(position) = position else {
            return RefreshOutcome::NoPosition;
        };

        match self.fetcher.fetch(position, radius).await {
            Ok(Fetch::Throttled) => RefreshOutcome::Throttled,
            Ok(Fetch::Completed(places)) => {
                let count = places.len();
                self.state.write().await.places = Arc::new(places);
                RefreshOutcome::Updated { count }
            }
            Err(e) => {
                self.raise(&e).await;
                RefreshOutcome::Failed {
                    message: e.user_message(),
                }
            }
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, PlaceError> {
        let places = self.state.read().await.places.clone();

        match self.resolver.resolve(query, &places).await {
            Ok(Resolution::Ignored) => Ok(SearchOutcome::Ignored),
            Ok(Resolution::Resolved(position)) => {
                self.state.write().await.candidates.clear();
                let refresh = self.relocate(position).await;
                Ok(SearchOutcome::Resolved { position, refresh })
            }
            Ok(Resolution::Candidates(candidates)) => {
                self.state.write().await.candidates = candidates.clone();
                Ok(SearchOutcome::Candidates { candidates })
            }
            Err(e) => {
                self.raise(&e).await;
                Err(e)
            }
        }
    }

    /// Pick one of the pending ambiguous matches.
    pub async fn select_candidate(&self, id: &str) -> Result<(Coordinate, RefreshOutcome), PlaceError> {
        let position = {
            let mut state = self.state.write().await;
            let position = state
                .candidates
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.coordinate)
                .ok_or_else(|| PlaceError::UnknownCandidate(id.to_string()))?;
            state.candidates.clear();
            position
        };
        let refresh = self.relocate(position).await;
        Ok((position, refresh))
    }

    pub async fn set_filters(&self, filters: CategoryFilters) {
        self.state.write().await.filters = filters;
    }

    pub async fn dismiss_notice(&self) {
        self.state.write().await.notice = None;
    }

    pub async fn snapshot(&self) -> MapSnapshot {
        let state = self.state.read().await;
        MapSnapshot {
            position: state.position,
            radius_meters: state.radius_meters,
            loading: self.fetcher.is_loading(),
            last_fetch_at: self.fetcher.last_attempt_at(),
            notice: state.notice.clone(),
            filters: state.filters,
            candidates: state.candidates.clone(),
            total_places: state.places.len(),
            places: visible_places(&state.places, &state.filters),
        }
    }

    async fn raise(&self, error: &PlaceError) {
        if let Some(notice) = Notice::from_error(error) {
            tracing::warn!("Notice: {}", notice.message);
            self.state.write().await.notice = Some(notice);
        }
    }
}

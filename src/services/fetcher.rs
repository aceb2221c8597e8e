//! Fetching and shaping nearby places.
//!
//! One call = one request to the geospatial backend. Calls closer than
//! [`MIN_FETCH_INTERVAL`] to the previous attempt are dropped, not queued.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::{PlaceError, PlaceSource};
use crate::models::{Coordinate, OsmElement, Place};

pub const MIN_FETCH_INTERVAL: Duration = Duration::from_secs(30);

/// Rate limiter bookkeeping plus the loading indicator.
#[derive(Debug, Default)]
pub struct FetchState {
    last_attempt: Option<Instant>,
    last_attempt_at: Option<DateTime<Utc>>,
    in_flight: usize,
}

impl FetchState {
    /// Record an attempt at `now` unless the previous one is too recent.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_attempt
            && now.saturating_duration_since(last) < MIN_FETCH_INTERVAL
        {
            return false;
        }
        self.last_attempt = Some(now);
        self.last_attempt_at = Some(Utc::now());
        self.in_flight += 1;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn last_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.last_attempt_at
    }
}

/// Outcome of a fetch that did not fail.
#[derive(Debug)]
pub enum Fetch {
    /// Suppressed by the rate limiter; nothing was sent
    Throttled,
    /// Fresh, deduplicated, distance-sorted list
    Completed(Vec<Place>),
}

/// Turn raw elements into the display list.
///
/// Elements without any position are skipped, the first element seen for a
/// given `{kind}-{id}` wins, and the result is sorted by ascending distance.
pub fn build_places(elements: &[OsmElement], user: Coordinate) -> Vec<Place> {
    let mut seen = HashSet::new();
    let mut places: Vec<Place> = elements
        .iter()
        .filter_map(|el| Place::from_element(el, user))
        .filter(|place| seen.insert(place.id.clone()))
        .collect();

    // stable: equal distances keep backend order
    places.sort_by_key(|p| p.distance_meters);
    places
}

pub struct PlaceFetcher {
    source: Arc<dyn PlaceSource>,
    state: Mutex<FetchState>,
}

/// Clears the in-flight marker on every exit path, including early returns
/// and a dropped future.
struct InFlight<'a> {
    fetcher: &'a PlaceFetcher,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.fetcher.lock_state().finish();
    }
}

impl PlaceFetcher {
    pub fn new(source: Arc<dyn PlaceSource>) -> Self {
        Self {
            source,
            state: Mutex::new(FetchState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FetchState> {
        // the state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    pub fn last_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.lock_state().last_attempt_at()
    }

    pub async fn fetch(&self, center: Coordinate, radius_meters: u32) -> Result<Fetch, PlaceError> {
        if !self.lock_state().try_begin(Instant::now()) {
            tracing::warn!(
                "Skipping place fetch: last attempt less than {}s ago",
                MIN_FETCH_INTERVAL.as_secs()
            );
            return Ok(Fetch::Throttled);
        }
        let _in_flight = InFlight { fetcher: self };

        tracing::info!("Fetching places within {}m of {}", radius_meters, center);
        let elements = self
            .source
            .nearby_elements(center, radius_meters)
            .await
            .inspect_err(|e| tracing::error!("{}", e))?;

        let places = build_places(&elements, center);
        tracing::info!(
            "Fetched {} elements, {} unique places",
            elements.len(),
            places.len()
        );
        Ok(Fetch::Completed(places))
    }
}

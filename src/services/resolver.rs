//! Free-text search: already-fetched places first, geocoder second.

use std::sync::Arc;

use crate::domain::{Geocoder, PlaceError};
use crate::models::{Coordinate, Place};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Blank query, nothing to do
    Ignored,
    /// A single position to centre on
    Resolved(Coordinate),
    /// Several fetched places match; the caller picks one
    Candidates(Vec<Place>),
}

/// Places whose name contains `query`, ignoring case.
pub fn match_places(places: &[Place], query: &str) -> Vec<Place> {
    let needle = query.to_lowercase();
    places
        .iter()
        .filter(|p| p.name_matches(&needle))
        .cloned()
        .collect()
}

pub struct Resolver {
    geocoder: Arc<dyn Geocoder>,
}

impl Resolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, query: &str, places: &[Place]) -> Result<Resolution, PlaceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Resolution::Ignored);
        }

        let mut matches = match_places(places, query);
        match matches.len() {
            0 => {}
            1 => {
                let place = matches.remove(0);
                tracing::info!("Search {:?} matched {} ({})", query, place.name, place.id);
                return Ok(Resolution::Resolved(place.coordinate));
            }
            n => {
                tracing::info!("Search {:?} matched {} fetched places", query, n);
                return Ok(Resolution::Candidates(matches));
            }
        }

        tracing::info!("No fetched place matches {:?}, asking the geocoder", query);
        let found = self.geocoder.geocode(query).await.inspect_err(|e| {
            tracing::error!("Geocoding {:?} failed: {}", query, e);
        })?;

        match found.first() {
            Some(position) if position.is_valid() => Ok(Resolution::Resolved(*position)),
            Some(position) => {
                tracing::warn!("Geocoder returned an out-of-range position {}", position);
                Err(PlaceError::SearchNotFound)
            }
            None => Err(PlaceError::SearchNotFound),
        }
    }
}

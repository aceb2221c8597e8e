//! Contracts for the external collaborators of the pipeline.
//!
//! HTTP implementations live in `modules::integrations`; tests plug in fakes.

use async_trait::async_trait;
use std::time::Duration;

use super::PlaceError;
use crate::models::{Coordinate, OsmElement};

/// Options passed to the device geolocation service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Zero means a cached reading is never accepted
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(8),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Device geolocation
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinate, PlaceError>;
}

/// Geospatial query backend returning raw points of interest
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// All restaurants, fast-food outlets and hotels within `radius_meters` of `center`.
    async fn nearby_elements(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<OsmElement>, PlaceError>;
}

/// Free-text geocoding backend
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Matching coordinates in backend relevance order; empty when nothing matched.
    async fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, PlaceError>;
}

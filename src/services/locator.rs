//! Starting position for the map.
//!
//! The device reading is preferred; anything else (no geolocation, denied
//! permission, timeout) silently lands on a fixed fallback position so the
//! app never blocks on a missing permission.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{PlaceError, PositionOptions, PositionSource};
use crate::models::Coordinate;

/// Tegucigalpa city centre
pub const FALLBACK_POSITION: Coordinate = Coordinate::new(14.0723, -87.1921);

pub struct Locator {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
    fallback: Coordinate,
}

impl Locator {
    pub fn new(source: Option<Arc<dyn PositionSource>>) -> Self {
        Self {
            source,
            options: PositionOptions::default(),
            fallback: FALLBACK_POSITION,
        }
    }

    /// Resolve the user's position once. Never fails.
    pub async fn locate(&self) -> Coordinate {
        match self.try_device().await {
            Ok(position) => {
                tracing::info!("Device position: {}", position);
                position
            }
            Err(e) => {
                tracing::warn!("{}, using fallback position {}", e, self.fallback);
                self.fallback
            }
        }
    }

    async fn try_device(&self) -> Result<Coordinate, PlaceError> {
        let source = self.source.as_ref().ok_or_else(|| {
            PlaceError::LocationUnavailable("geolocation not supported".to_string())
        })?;

        let reading = tokio::time::timeout(self.options.timeout, source.current_position(self.options))
            .await
            .map_err(|_| {
                PlaceError::LocationUnavailable(format!(
                    "no reading within {:?}",
                    self.options.timeout
                ))
            })??;

        if !reading.is_valid() {
            return Err(PlaceError::LocationUnavailable(format!(
                "device reported an invalid position {}",
                reading
            )));
        }
        Ok(reading)
    }
}

/// A device reading supplied up front (e.g. from configuration).
pub struct StaticPositionSource(pub Coordinate);

#[async_trait]
impl PositionSource for StaticPositionSource {
    async fn current_position(&self, _options: PositionOptions) -> Result<Coordinate, PlaceError> {
        Ok(self.0)
    }
}

//! Application state shared across all handlers

use std::sync::Arc;

use crate::modules::integrations::nominatim::NominatimClient;
use crate::modules::integrations::overpass::OverpassClient;
use crate::services::{MapController, PlaceFetcher, Resolver};

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub map: Arc<MapController>,
}

impl AppState {
    pub fn new(map: MapController) -> Self {
        Self { map: Arc::new(map) }
    }

    /// Wire the controller to the real Overpass and Nominatim backends.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let overpass = OverpassClient::new(config.overpass_url.clone(), config.http_timeout)?;
        let nominatim = NominatimClient::new(config.nominatim_url.clone(), config.http_timeout)?;

        let map = MapController::new(
            PlaceFetcher::new(Arc::new(overpass)),
            Resolver::new(Arc::new(nominatim)),
            config.default_radius,
        );
        Ok(Self::new(map))
    }
}

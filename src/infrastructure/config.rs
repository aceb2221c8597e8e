use std::env;
use std::time::Duration;

use crate::models::Coordinate;
use crate::modules::integrations::nominatim::DEFAULT_NOMINATIM_URL;
use crate::modules::integrations::overpass::DEFAULT_OVERPASS_URL;
use crate::services::controller::{DEFAULT_RADIUS_METERS, MAX_RADIUS_METERS};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub overpass_url: String,
    pub nominatim_url: String,
    pub default_radius: u32,
    /// Device reading; `None` means geolocation is unavailable
    pub device_position: Option<Coordinate>,
    pub cors_allowed_origins: Vec<String>,
    /// Outbound request timeout; `None` leaves it to the transport
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        let device_position = match (parsed("DEVICE_LAT"), parsed("DEVICE_LON")) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            overpass_url: endpoint(lookup("OVERPASS_URL"), DEFAULT_OVERPASS_URL),
            nominatim_url: endpoint(lookup("NOMINATIM_URL"), DEFAULT_NOMINATIM_URL),
            default_radius: lookup("DEFAULT_RADIUS")
                .and_then(|r| r.parse().ok())
                .filter(|r| *r > 0 && *r <= MAX_RADIUS_METERS)
                .unwrap_or(DEFAULT_RADIUS_METERS),
            device_position,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            http_timeout: lookup("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        }
    }
}

fn endpoint(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) => match url::Url::parse(&v) {
            Ok(_) => v,
            Err(e) => {
                tracing::warn!("Ignoring invalid endpoint {:?} ({}), using {}", v, e, default);
                default.to_string()
            }
        },
        None => default.to_string(),
    }
}

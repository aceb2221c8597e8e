pub mod nominatim;
pub mod overpass;

/// Sent with every outbound request; Nominatim rejects anonymous clients.
pub const USER_AGENT: &str = concat!("NearbyPlaces/", env!("CARGO_PKG_VERSION"));

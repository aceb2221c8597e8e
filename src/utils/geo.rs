use crate::models::Coordinate;

/// Mean Earth radius used by the distance formula, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates (haversine formula).
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_phi = (to.lat - from.lat).to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Distance rounded to the nearest metre, as shown next to each place.
pub fn rounded_distance_meters(from: Coordinate, to: Coordinate) -> u32 {
    haversine_meters(from, to).round() as u32
}

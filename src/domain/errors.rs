//! Domain error types
//!
//! Every failure is recovered locally. User-facing variants turn into a notice
//! and the map stays usable with whatever data it already had.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceError {
    /// Device geolocation failed or is missing (handled by the fallback position)
    LocationUnavailable(String),
    /// Geospatial query failed (network, HTTP status or malformed JSON)
    FetchFailed(String),
    /// Geocoder answered with no results
    SearchNotFound,
    /// Geocoder request failed
    SearchFailed(String),
    /// Radius outside the accepted range
    InvalidRadius(u32),
    /// Candidate id not part of the current ambiguous search
    UnknownCandidate(String),
}

impl PlaceError {
    /// Text shown to the user. Internal detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            PlaceError::LocationUnavailable(_) => "Location unavailable".to_string(),
            PlaceError::FetchFailed(_) => {
                "Places could not be loaded. Please try again later.".to_string()
            }
            PlaceError::SearchNotFound => "Place not found.".to_string(),
            PlaceError::SearchFailed(_) => "Search error.".to_string(),
            PlaceError::InvalidRadius(r) => {
                format!("Radius must be between 1 and 5000 meters (got {})", r)
            }
            PlaceError::UnknownCandidate(id) => format!("No search candidate with id {}", id),
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::LocationUnavailable(msg) => write!(f, "Location unavailable: {}", msg),
            PlaceError::FetchFailed(msg) => write!(f, "Fetching places failed: {}", msg),
            PlaceError::SearchNotFound => write!(f, "Search returned no results"),
            PlaceError::SearchFailed(msg) => write!(f, "Search failed: {}", msg),
            PlaceError::InvalidRadius(r) => write!(f, "Invalid radius: {}", r),
            PlaceError::UnknownCandidate(id) => write!(f, "Unknown search candidate: {}", id),
        }
    }
}

impl std::error::Error for PlaceError {}

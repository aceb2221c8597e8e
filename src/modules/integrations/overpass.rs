use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{PlaceError, PlaceSource};
use crate::models::{Coordinate, OsmElement};

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// The four tag filters we ask for: restaurants, fast food (both tagging
/// conventions) and hotels.
const CATEGORY_FILTERS: [(&str, &str); 4] = [
    ("amenity", "restaurant"),
    ("amenity", "fast_food"),
    ("shop", "fast_food"),
    ("tourism", "hotel"),
];

const ELEMENT_KINDS: [&str; 3] = ["node", "way", "relation"];

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

/// Build the Overpass QL union for every category around `center`.
///
/// `out center` makes ways and relations carry a center point.
pub fn build_query(center: Coordinate, radius_meters: u32) -> String {
    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for (key, value) in CATEGORY_FILTERS {
        for kind in ELEMENT_KINDS {
            query.push_str(&format!(
                "  {}[\"{}\"=\"{}\"](around:{},{},{});\n",
                kind, key, value, radius_meters, center.lat, center.lon
            ));
        }
    }
    query.push_str(");\nout center;\n");
    query
}

#[derive(Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder().user_agent(super::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| format!("Failed to build client: {}", e))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn query_overpass(&self, query: &str) -> Result<Vec<OsmElement>, PlaceError> {
        let res = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query.to_string())
            .send()
            .await
            .map_err(|e| PlaceError::FetchFailed(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(PlaceError::FetchFailed(format!(
                "Overpass API error: {}",
                res.status()
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| PlaceError::FetchFailed(format!("Read body failed: {}", e)))?;

        let data: OverpassResponse = serde_json::from_str(&body)
            .map_err(|e| PlaceError::FetchFailed(format!("Parse error: {}", e)))?;
        Ok(data.elements)
    }
}

#[async_trait]
impl PlaceSource for OverpassClient {
    async fn nearby_elements(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<OsmElement>, PlaceError> {
        let query = build_query(center, radius_meters);
        tracing::debug!("Overpass query:\n{}", query);
        self.query_overpass(&query).await
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{Geocoder, PlaceError};
use crate::models::Coordinate;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// One entry of `/search?format=json`. Coordinates come back as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

impl NominatimResult {
    fn coordinate(&self) -> Result<Coordinate, PlaceError> {
        let lat = self.lat.trim().parse::<f64>().map_err(|e| {
            PlaceError::SearchFailed(format!("Invalid latitude {:?}: {}", self.lat, e))
        })?;
        let lon = self.lon.trim().parse::<f64>().map_err(|e| {
            PlaceError::SearchFailed(format!("Invalid longitude {:?}: {}", self.lon, e))
        })?;
        Ok(Coordinate::new(lat, lon))
    }
}

#[derive(Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder().user_agent(super::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| format!("Failed to build client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<NominatimResult>, PlaceError> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlaceError::SearchFailed(format!("Request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(PlaceError::SearchFailed(format!(
                "Nominatim API error: {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| PlaceError::SearchFailed(format!("Read body failed: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| PlaceError::SearchFailed(format!("Parse error: {}", e)))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, PlaceError> {
        let results = self.search(query).await?;
        if let Some(first) = results.first() {
            tracing::debug!(
                "Nominatim top hit for {:?}: {}",
                query,
                first.display_name.as_deref().unwrap_or("?")
            );
        }

        // a malformed entry only drops itself; the search fails when none parse
        let coordinates: Vec<Coordinate> = results
            .iter()
            .filter_map(|r| {
                r.coordinate()
                    .inspect_err(|e| tracing::warn!("Skipping geocoder entry: {}", e))
                    .ok()
            })
            .collect();

        if coordinates.is_empty() && !results.is_empty() {
            return Err(PlaceError::SearchFailed(format!(
                "none of the {} geocoder results had a usable position",
                results.len()
            )));
        }
        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_geocode_parses_string_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("format", "json"))
            .and(query_param("q", "San Pedro Sula"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "15.5042", "lon": "-88.0250", "display_name": "San Pedro Sula, Cortés, Honduras" },
                { "lat": "15.4", "lon": "-88.1" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NominatimClient::new(format!("{}/", mock_server.uri()), None).unwrap();
        let coords = client.geocode("San Pedro Sula").await.unwrap();

        assert_eq!(
            coords,
            vec![Coordinate::new(15.5042, -88.025), Coordinate::new(15.4, -88.1)]
        );
    }

    #[tokio::test]
    async fn test_empty_array_is_no_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = NominatimClient::new(mock_server.uri(), None).unwrap();
        assert!(client.geocode("nowhere at all").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_search_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = NominatimClient::new(mock_server.uri(), None).unwrap();
        let result = client.geocode("Tegucigalpa").await;
        assert!(matches!(result, Err(PlaceError::SearchFailed(_))));
    }

    #[tokio::test]
    async fn test_malformed_trailing_entry_is_skipped() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "15.5", "lon": "-88.0" },
                { "lat": "", "lon": "-88" }
            ])))
            .mount(&mock_server)
            .await;

        let client = NominatimClient::new(mock_server.uri(), None).unwrap();
        let coords = client.geocode("x").await.unwrap();
        assert_eq!(coords, vec![Coordinate::new(15.5, -88.0)]);
    }

    #[tokio::test]
    async fn test_unparseable_coordinate_is_search_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "lat": "north", "lon": "-88" }])),
            )
            .mount(&mock_server)
            .await;

        let client = NominatimClient::new(mock_server.uri(), None).unwrap();
        let result = client.geocode("x").await;
        assert!(matches!(result, Err(PlaceError::SearchFailed(_))));
    }
}

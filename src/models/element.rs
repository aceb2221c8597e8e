//! Raw elements as returned by the Overpass interpreter (`[out:json]` + `out center`).

use serde::Deserialize;
use std::collections::BTreeMap;

use super::Coordinate;

#[derive(Debug, Clone, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    /// `node`, `way` or `relation`
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Only present on ways and relations when the query asked for `out center`
    pub center: Option<ElementCenter>,
    pub tags: Option<BTreeMap<String, String>>,
}

impl OsmElement {
    /// Own position if the element has one, otherwise its aggregate center.
    pub fn position(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => self
                .center
                .as_ref()
                .map(|c| Coordinate::new(c.lat, c.lon)),
        }
    }

    /// Key used to collapse repeated results for the same OSM object.
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.kind, self.id)
    }
}

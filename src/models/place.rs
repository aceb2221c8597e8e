use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::{Coordinate, OsmElement};
use crate::utils::geo::rounded_distance_meters;

/// Shown when the backend gives neither a `name` nor a `brand` tag.
pub const UNNAMED_PLACE: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    FastFood,
    Hotel,
    Other,
}

impl Category {
    /// Derive the category from OSM tags.
    ///
    /// Precedence is fixed: `amenity=restaurant`, then `amenity=fast_food` or
    /// `shop=fast_food`, then `tourism=hotel`.
    pub fn from_tags(tags: &BTreeMap<String, String>) -> Self {
        let tag = |key: &str| tags.get(key).map(String::as_str);

        if tag("amenity") == Some("restaurant") {
            Category::Restaurant
        } else if tag("amenity") == Some("fast_food") || tag("shop") == Some("fast_food") {
            Category::FastFood
        } else if tag("tourism") == Some("hotel") {
            Category::Hotel
        } else {
            Category::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::FastFood => "Fast food",
            Category::Hotel => "Hotel",
            Category::Other => "Other",
        }
    }
}

/// A point of interest near the user, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Place {
    /// `{kind}-{osm id}`, e.g. `node-123`
    pub id: String,
    pub name: String,
    pub category: Category,
    pub coordinate: Coordinate,
    pub distance_meters: u32,
    pub raw_tags: BTreeMap<String, String>,
}

impl Place {
    /// Build a place from a raw element, measuring from `user`.
    ///
    /// Returns `None` for elements that carry neither a position nor a center.
    pub fn from_element(element: &OsmElement, user: Coordinate) -> Option<Self> {
        let coordinate = element.position()?;
        let raw_tags = element.tags.clone().unwrap_or_default();

        let name = raw_tags
            .get("name")
            .or_else(|| raw_tags.get("brand"))
            .cloned()
            .unwrap_or_else(|| UNNAMED_PLACE.to_string());

        Some(Place {
            id: element.dedup_key(),
            name,
            category: Category::from_tags(&raw_tags),
            coordinate,
            distance_meters: rounded_distance_meters(user, coordinate),
            raw_tags,
        })
    }

    /// Case-insensitive substring match on the name.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fast_food_both_conventions() {
        assert_eq!(
            Category::from_tags(&tags(&[("amenity", "fast_food")])),
            Category::FastFood
        );
        assert_eq!(
            Category::from_tags(&tags(&[("shop", "fast_food")])),
            Category::FastFood
        );
    }

    #[test]
    fn test_hotel_with_unrelated_tags() {
        let t = tags(&[
            ("tourism", "hotel"),
            ("amenity", "parking"),
            ("shop", "souvenirs"),
            ("stars", "4"),
        ]);
        assert_eq!(Category::from_tags(&t), Category::Hotel);
    }

    #[test]
    fn test_restaurant_wins_over_hotel() {
        let t = tags(&[("amenity", "restaurant"), ("tourism", "hotel")]);
        assert_eq!(Category::from_tags(&t), Category::Restaurant);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(Category::from_tags(&tags(&[("amenity", "bank")])), Category::Other);
        assert_eq!(Category::from_tags(&BTreeMap::new()), Category::Other);
    }

    fn element(json: serde_json::Value) -> OsmElement {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_name_falls_back_to_brand_then_placeholder() {
        let user = Coordinate::new(0.0, 0.0);

        let branded = element(serde_json::json!({
            "type": "node", "id": 1, "lat": 0.0, "lon": 0.0,
            "tags": { "amenity": "fast_food", "brand": "Pollo Campero" }
        }));
        assert_eq!(Place::from_element(&branded, user).unwrap().name, "Pollo Campero");

        let anonymous = element(serde_json::json!({
            "type": "node", "id": 2, "lat": 0.0, "lon": 0.0,
            "tags": { "amenity": "restaurant" }
        }));
        assert_eq!(Place::from_element(&anonymous, user).unwrap().name, UNNAMED_PLACE);

        let untagged = element(serde_json::json!({
            "type": "node", "id": 3, "lat": 0.0, "lon": 0.0
        }));
        let place = Place::from_element(&untagged, user).unwrap();
        assert_eq!(place.name, UNNAMED_PLACE);
        assert_eq!(place.category, Category::Other);
        assert!(place.raw_tags.is_empty());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_value(Category::FastFood).unwrap();
        assert_eq!(json, "fast_food");
    }
}

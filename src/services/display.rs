//! Which places are shown and how their markers look.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Place};

const MARKER_ICON_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";
pub const MARKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

/// Visibility toggles, one per displayable category. `Other` is never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryFilters {
    pub restaurants: bool,
    pub fast_food: bool,
    pub hotels: bool,
}

impl Default for CategoryFilters {
    fn default() -> Self {
        Self {
            restaurants: true,
            fast_food: true,
            hotels: true,
        }
    }
}

impl CategoryFilters {
    pub fn shows(&self, category: Category) -> bool {
        match category {
            Category::Restaurant => self.restaurants,
            Category::FastFood => self.fast_food,
            Category::Hotel => self.hotels,
            Category::Other => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    /// Under 500 m
    Near,
    /// Under 1000 m
    Mid,
    Far,
}

impl DistanceTier {
    pub fn for_distance(distance_meters: u32) -> Self {
        if distance_meters < 500 {
            DistanceTier::Near
        } else if distance_meters < 1000 {
            DistanceTier::Mid
        } else {
            DistanceTier::Far
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DistanceTier::Near => "green",
            DistanceTier::Mid => "orange",
            DistanceTier::Far => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Hotels always get the same icon whatever the distance
    Hotel,
    Distance { tier: DistanceTier },
}

impl MarkerStyle {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerStyle::Hotel => "blue",
            MarkerStyle::Distance { tier } => tier.color(),
        }
    }

    pub fn icon_url(&self) -> String {
        format!("{}/marker-icon-2x-{}.png", MARKER_ICON_BASE, self.color())
    }
}

pub fn marker_style(category: Category, distance_meters: u32) -> MarkerStyle {
    match category {
        Category::Hotel => MarkerStyle::Hotel,
        _ => MarkerStyle::Distance {
            tier: DistanceTier::for_distance(distance_meters),
        },
    }
}

/// A place as the map should draw it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceMarker {
    #[serde(flatten)]
    pub place: Place,
    pub marker: MarkerStyle,
    pub color: String,
    pub icon_url: String,
    pub shadow_url: String,
}

impl PlaceMarker {
    pub fn new(place: Place) -> Self {
        let marker = marker_style(place.category, place.distance_meters);
        Self {
            color: marker.color().to_string(),
            icon_url: marker.icon_url(),
            shadow_url: MARKER_SHADOW_URL.to_string(),
            marker,
            place,
        }
    }
}

pub fn visible_places(places: &[Place], filters: &CategoryFilters) -> Vec<PlaceMarker> {
    places
        .iter()
        .filter(|p| filters.shows(p.category))
        .cloned()
        .map(PlaceMarker::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use std::collections::BTreeMap;

    fn place(id: &str, category: Category, distance: u32) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            category,
            coordinate: Coordinate::new(0.0, 0.0),
            distance_meters: distance,
            raw_tags: BTreeMap::new(),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(DistanceTier::for_distance(0), DistanceTier::Near);
        assert_eq!(DistanceTier::for_distance(499), DistanceTier::Near);
        assert_eq!(DistanceTier::for_distance(500), DistanceTier::Mid);
        assert_eq!(DistanceTier::for_distance(999), DistanceTier::Mid);
        assert_eq!(DistanceTier::for_distance(1000), DistanceTier::Far);
    }

    #[test]
    fn test_hotel_ignores_distance() {
        assert_eq!(marker_style(Category::Hotel, 10), MarkerStyle::Hotel);
        assert_eq!(marker_style(Category::Hotel, 4000), MarkerStyle::Hotel);
        assert_eq!(
            marker_style(Category::FastFood, 499),
            MarkerStyle::Distance {
                tier: DistanceTier::Near
            }
        );
        assert_eq!(
            MarkerStyle::Hotel.icon_url(),
            format!("{}/marker-icon-2x-blue.png", MARKER_ICON_BASE)
        );
    }

    #[test]
    fn test_filters_hide_other_and_toggled_categories() {
        let places = vec![
            place("r", Category::Restaurant, 100),
            place("f", Category::FastFood, 600),
            place("h", Category::Hotel, 1200),
            place("o", Category::Other, 50),
        ];

        let all = visible_places(&places, &CategoryFilters::default());
        let ids: Vec<&str> = all.iter().map(|m| m.place.id.as_str()).collect();
        assert_eq!(ids, vec!["r", "f", "h"]);
        assert_eq!(all[1].color, "orange");

        let no_food = CategoryFilters {
            restaurants: false,
            fast_food: false,
            hotels: true,
        };
        let shown = visible_places(&places, &no_food);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].marker, MarkerStyle::Hotel);
    }

    #[test]
    fn test_marker_serializes_flat() {
        let json = serde_json::to_value(PlaceMarker::new(place("node-1", Category::Restaurant, 1500)))
            .unwrap();
        assert_eq!(json["id"], "node-1");
        assert_eq!(json["category"], "restaurant");
        assert_eq!(json["marker"]["kind"], "distance");
        assert_eq!(json["marker"]["tier"], "far");
        assert_eq!(json["color"], "red");
    }
}

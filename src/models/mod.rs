pub mod coordinate;
pub mod element;
pub mod place;

pub use coordinate::Coordinate;
pub use element::{ElementCenter, OsmElement};
pub use place::{Category, Place, UNNAMED_PLACE};

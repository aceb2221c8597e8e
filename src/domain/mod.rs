//! Domain layer - Pure pipeline abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no reqwest).
//! Only the traits for external collaborators and the error taxonomy.

pub mod errors;
pub mod sources;

pub use errors::PlaceError;
pub use sources::*;

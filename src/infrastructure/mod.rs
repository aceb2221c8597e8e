//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Router assembly and port selection (server)
//! - Application state (state)

pub mod config;
pub mod server;
pub mod state;

pub use state::AppState;

//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (SQLite today, any relational store tomorrow)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::*;

// =============================================================================
// Helper Types
// =============================================================================
pub use types::{LocationChanges, LocationFilter, NewLocation, Page, PageRequest};

// =============================================================================
// Errors and Testability
// =============================================================================
pub use error::RepoError;
pub use testing::ClockPort;

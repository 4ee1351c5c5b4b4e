//! Locatr domain: the Location entity and the invariants its fields carry.
//!
//! No web framework or database driver may be depended on from here
//! (`cargo xtask arch-check` enforces it).

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::Location;
pub use error::DomainError;
pub use ids::LocationId;
pub use value_objects::{ImageUrl, LocationCode, LocationName};

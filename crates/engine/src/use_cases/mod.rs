//! Use cases - request orchestration on top of the repository ports.

pub mod location;
pub mod validation;

pub use location::{LocationError, LocationService};
pub use validation::FieldErrors;

//! Locatr Client - SDK for the Locatr API
//!
//! - [`LocationClient`]: typed calls for every endpoint, with failures
//!   classified into [`ClientError`]
//! - [`LocationForm`]: client-side validation of the create/edit form
//! - [`LocationsPage`]: headless state behind a locations management page

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod state;

pub use client::LocationClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use form::{FormErrors, LocationForm};
pub use state::LocationsPage;

//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::LocationRepo;
use crate::use_cases::LocationService;

/// Main application state.
///
/// Passed to HTTP handlers and middleware via Axum state.
pub struct App {
    pub config: EngineConfig,
    pub locations: LocationService,
}

impl App {
    pub fn new(config: EngineConfig, location_repo: Arc<dyn LocationRepo>) -> Self {
        Self {
            config,
            locations: LocationService::new(location_repo),
        }
    }
}

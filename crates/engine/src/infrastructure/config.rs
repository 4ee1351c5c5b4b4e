//! Engine configuration, read from the environment.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings for the engine binary.
///
/// Every field maps to the upper-cased environment variable of the same name
/// (`server_port` ← `SERVER_PORT`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,
    /// Include internal error text in 500 responses.
    pub app_debug: bool,
    /// Prefix for pagination links; empty yields relative links.
    pub public_url: String,
    pub seed_demo_data: bool,
    /// Allowed CORS origin; `None` allows any.
    pub cors_allowed_origin: Option<String>,
}

impl EngineConfig {
    /// Load `.env` (if any) and then read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv_from_repo_root();
        Self::from_source(None)
    }

    /// Read settings from an explicit variable map instead of the process
    /// environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 8000)?
            .set_default("database_url", "sqlite:locations.db?mode=rwc")?
            .set_default("database_max_connections", 5)?
            .set_default("app_debug", false)?
            .set_default("public_url", "")?
            .set_default("seed_demo_data", false)?
            .add_source(Environment::default().source(vars))
            .build()?
            .try_deserialize()?;

        config.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_key = self.api_key.trim().to_string();
        if self.api_key.is_empty() {
            return Err(ConfigError::Message("API_KEY must not be empty".into()));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::Message(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        self.public_url = self.public_url.trim().trim_end_matches('/').to_string();
        self.cors_allowed_origin = self
            .cors_allowed_origin
            .take()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty() && origin != "*");
        Ok(self)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Settings for tests: in-memory defaults with the given key.
    #[cfg(test)]
    pub fn for_tests(api_key: &str) -> Self {
        Self {
            server_host: "127.0.0.1".into(),
            server_port: 0,
            database_url: "sqlite::memory:".into(),
            database_max_connections: 1,
            api_key: api_key.into(),
            app_debug: false,
            public_url: String::new(),
            seed_demo_data: false,
            cors_allowed_origin: None,
        }
    }
}

/// The engine is usually started from `crates/engine`, so look for `.env` in
/// the workspace root before falling back to the working directory.
fn load_dotenv_from_repo_root() {
    let root_env = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(|root| root.join(".env"));

    match root_env {
        Some(path) if path.exists() => load_dotenv_file(&path),
        _ => {
            if let Err(e) = dotenvy::dotenv() {
                tracing::debug!(error = %e, "No .env file loaded");
            }
        }
    }
}

fn load_dotenv_file(path: &Path) {
    if let Err(e) = dotenvy::from_path(path) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to load .env file");
    }
}

//! Async host for the hero and IBGE geo lookup clients.
//!
//! # Overview
//! Executes the requests built by `hero-geo-core` over reqwest, applies the
//! fixed retry policy, and exposes `HeroService` / `GeoLookupService` plus
//! the view models that bind their results.
//!
//! # Design
//! - `Transport` is the only I/O seam; `ScriptedTransport` (behind the
//!   `testing` feature) stands in for it in tests.
//! - `Executor` owns retrying and logs each failed call exactly once.
//! - Configuration comes from the environment (`ClientConfig::from_env`).

use std::sync::Arc;

use hero_geo_core::{GeoClient, HeroClient};
use thiserror::Error;

pub mod config;
pub mod executor;
pub mod geo_service;
pub mod hero_service;
pub mod teardown;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;
pub mod views;

pub use config::{ClientConfig, ConfigError};
pub use executor::Executor;
pub use geo_service::GeoLookupService;
pub use hero_service::HeroService;
pub use teardown::Teardown;
pub use transport::{ReqwestTransport, Transport};
pub use views::{GeoLookupView, HeroListView};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Both services wired to one shared transport.
#[derive(Clone)]
pub struct Services {
    pub heroes: HeroService,
    pub geo: GeoLookupService,
}

impl Services {
    pub fn from_env() -> Result<Self, SetupError> {
        let config = ClientConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SetupError> {
        let transport = ReqwestTransport::new(config.http.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let executor = Executor::new(transport, config.http.retry);
        tracing::debug!(
            hero_api = %config.hero_api.base_url,
            geo_api = %config.geo_api.base_url,
            max_retries = config.http.retry.max_retries,
            "services configured"
        );
        Self {
            heroes: HeroService::new(
                HeroClient::new(&config.hero_api.base_url)
                    .with_auth_token(config.hero_api.auth_token.clone()),
                executor.clone(),
            ),
            geo: GeoLookupService::new(GeoClient::new(&config.geo_api.base_url), executor),
        }
    }
}

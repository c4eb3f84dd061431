//! Shared application state

use crate::auth::{self, Authenticator};
use std::sync::Arc;
use vt_core::{CleaningService, Config, CoreResult};

/// State handed to every handler
pub struct AppState {
    pub service: CleaningService,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(service: CleaningService, auth: Arc<dyn Authenticator>) -> Self {
        Self { service, auth }
    }

    /// Build the service, its store and the authenticator from configuration
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let service = CleaningService::from_config(config)?;
        let auth = auth::from_config(&config.auth);
        log::info!("Authentication: {}", auth.name());
        Ok(Self::new(service, auth))
    }
}

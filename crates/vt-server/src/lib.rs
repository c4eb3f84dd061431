//! vt-server - HTTP transport for Veritemiz
//!
//! Exposes the upload / process / download flows of
//! [`vt_core::CleaningService`] as an axum [`Router`], with pluggable
//! authentication, CORS and error-to-status mapping.

pub mod auth;
pub mod error;
mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;
use vt_core::config::CorsConfig;
use vt_core::{CoreError, CoreResult};

pub use auth::{AllowAll, AuthError, Authenticator, BearerTokenAuth};
pub use error::ApiError;
pub use state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application router
pub fn router(state: Arc<AppState>, cors: &CorsConfig) -> CoreResult<Router> {
    let body_limit = state.service.max_upload_bytes() + MULTIPART_OVERHEAD;

    let api = Router::new()
        .route("/api/upload", post(handlers::upload))
        .route("/api/process", post(handlers::process))
        .route("/api/download/{file_id}", get(handlers::download))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_auth,
        ));

    Ok(Router::new()
        .merge(api)
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(cors)?)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(config: &CorsConfig) -> CoreResult<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(CoreError::ConfigInvalid {
                    message: "wildcard CORS origin is not allowed with credentials".to_string(),
                });
            }
            HeaderValue::from_str(origin).map_err(|_| CoreError::ConfigInvalid {
                message: format!("invalid CORS origin '{}'", origin),
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(600)))
}

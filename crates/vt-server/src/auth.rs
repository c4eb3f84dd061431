//! Pluggable request authentication
//!
//! Every `/api` route except the health probe passes through
//! [`require_auth`], which delegates to the [`Authenticator`] held in the
//! application state.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use vt_core::config::AuthConfig;

/// Authentication failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid bearer token")]
    InvalidToken,
}

/// Decides whether a request may proceed
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError>;

    /// Authenticator name for logging
    fn name(&self) -> &'static str;
}

/// Accepts every request
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<(), AuthError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Accepts requests carrying `Authorization: Bearer <token>` for a known token
#[derive(Debug, Clone)]
pub struct BearerTokenAuth {
    tokens: HashSet<String>,
}

impl BearerTokenAuth {
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

impl Authenticator for BearerTokenAuth {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AuthError::MissingToken)?;

        if self.tokens.contains(token) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    fn name(&self) -> &'static str {
        "bearer"
    }
}

/// Pick the authenticator described by `config`
pub fn from_config(config: &AuthConfig) -> Arc<dyn Authenticator> {
    if config.is_enabled() {
        Arc::new(BearerTokenAuth::new(config.tokens.iter().cloned()))
    } else {
        Arc::new(AllowAll)
    }
}

/// Middleware rejecting requests the configured authenticator refuses
pub(crate) async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = state.auth.authenticate(request.headers()) {
        log::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), err);
        return Err(err.into());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

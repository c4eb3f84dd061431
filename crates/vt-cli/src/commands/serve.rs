//! Serve command: run the HTTP API

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use vt_core::Config;
use vt_server::AppState;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::load_config;

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;

    let state = Arc::new(AppState::from_config(&config).context("Failed to build service")?);
    let app = vt_server::router(state, &config.cors).context("Failed to build router")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid host:port")?;

    println!(
        "Serving Veritemiz API at http://{}:{}",
        config.server.host, config.server.port
    );
    println!("Press Ctrl+C to stop.\n");

    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| {
        format!(
            "Failed to bind to {}:{}",
            config.server.host, config.server.port
        )
    })?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("Server stopped");
    Ok(())
}

/// Command-line values take precedence over the config file
fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(tokens) = &args.tokens {
        config.auth.tokens = tokens
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

#[cfg(test)]
#[path = "serve_test.rs"]
mod tests;

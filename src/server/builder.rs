//! ServerBuilder for fluent API to build the card wallet server

use super::exposure::{HtmlExposure, RestExposure};
use super::state::AppState;
use super::templates;
use crate::config::AppConfig;
use crate::storage::SharedCardStore;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the card wallet router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::load(None)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<SharedCardStore>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default config and an empty store
    pub fn new() -> Self {
        Self {
            store: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Share an existing store instead of starting empty
    pub fn with_store(mut self, store: SharedCardStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are merged after the built-in pages and API, so they
    /// must not reuse those paths.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared state without a router, useful for tests
    pub fn build_state(&mut self) -> Result<AppState> {
        let templates = templates::load().context("failed to compile page templates")?;
        Ok(AppState {
            store: self.store.take().unwrap_or_default(),
            config: Arc::new(self.config.clone()),
            templates: Arc::new(templates),
        })
    }

    /// Build the final router with pages, API and tracing
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = HtmlExposure::build_router(state.clone())
            .merge(RestExposure::build_router(state));

        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the config and stops on
    /// SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Card wallet listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

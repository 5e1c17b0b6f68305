//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Swap in a new resolver when the configuration changes

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{LayoutConfig, ServiceConfig};
use crate::http::handlers::{health, render_layout};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::layout::{FileRouteStore, LayoutResolver};

/// Resolver type served over HTTP.
pub type FileLayoutResolver = LayoutResolver<FileRouteStore>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ArcSwap<FileLayoutResolver>>,
}

impl AppState {
    pub fn new(resolver: FileLayoutResolver) -> Self {
        Self {
            resolver: Arc::new(ArcSwap::from_pointee(resolver)),
        }
    }

    /// Replace the resolver; in-flight requests finish on the old one.
    pub fn reload(&self, config: &LayoutConfig) {
        self.resolver
            .store(Arc::new(LayoutResolver::from_config(config)));
        tracing::info!(
            site_name = %config.site_name,
            data_dir = %config.data_dir,
            default_language = %config.default_language,
            "Layout configuration reloaded"
        );
    }
}

/// HTTP server for the layout service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(LayoutResolver::from_config(&config.layout));
        let router = Self::build_router(&config, state.clone());

        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/sitecore/api/layout/render/{configuration}", get(render_layout))
            .route("/healthz", get(health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            uri = %req.uri(),
                            request_id = %request_id(req.headers()),
                        )
                    }))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Router with all middleware, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Each config received on `config_updates` replaces the resolver.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            data_dir = %self.config.layout.data_dir,
            "HTTP server starting"
        );

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                state.reload(&new_config.layout);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

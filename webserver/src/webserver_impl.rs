//! Main webserver implementation
//!
//! `WebServer` owns the resolved configuration and the agency services, builds
//! the router and drives it until a shutdown signal arrives.

use std::future::Future;

use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use agency::BreedValidator;
use shared::{component_info, component_warn, logging, Component};

use crate::config::ServerConfig;
use crate::error::{WebServerError, WebServerResult};
use crate::web::handlers::health::{health_check, route_not_found};
use crate::web::{api_routes, AgencyStore, AppState};

/// Main webserver struct with dependency injection
pub struct WebServer<S, V>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    config: ServerConfig,
    state: AppState<S, V>,
}

impl<S, V> WebServer<S, V>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    pub fn new(config: ServerConfig, store: S, validator: V) -> Self {
        Self {
            config,
            state: AppState::new(store, validator),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .nest("/api/v1", api_routes::<S, V>())
            .route("/health", get(health_check))
            .fallback(route_not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %Uuid::new_v4(),
                            )
                        }),
                    )
                    .layer(cors_layer(&self.config.cors_origins)),
            )
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> WebServerResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, letting in-flight requests finish
    pub async fn run_until<F>(self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.bind_address().await?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| WebServerError::ServerStartupFailed {
                addr: addr.to_string(),
                source,
            })?;

        logging::log_startup(Component::Api, &format!("listening on http://{addr}"));
        component_info!(
            Component::Api,
            "🌐 Breed registry at {}, CORS origins {:?}",
            self.config.breed_registry.base_url,
            self.config.cors_origins
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                component_warn!(Component::Api, "⚠️ Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(Component::Api, "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(Component::Api, "Signal handling", &err);
            std::future::pending::<()>().await;
        }
    }
}

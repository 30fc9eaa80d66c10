//! HTTP server exposing the identity page.
//!
//! One page route plus a health probe. The index handler is the final
//! safety net: whatever goes wrong, the client gets the generic error
//! page with a non-2xx status instead of a hung or crashed worker.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::UnknownCountry;
use crate::generator::IdentityGenerator;
use crate::geo::CountryCode;
use crate::page::{render_error_page, render_page};

/// Shared application state. Immutable after startup; the generator's
/// HTTP clients are internally shareable.
pub struct AppState {
    pub generator: IdentityGenerator,
    pub default_country: CountryCode,
}

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(addr: SocketAddr, generator: IdentityGenerator, default_country: CountryCode) -> Self {
        let state = Arc::new(AppState {
            generator,
            default_country,
        });
        Self { addr, state }
    }

    /// Creates the router.
    fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        info!(addr = %self.addr, "Starting identikit server");

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        let shutdown_signal = async {
            let ctrl_c = async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("Failed to install Ctrl+C handler");
            };

            #[cfg(unix)]
            let terminate = async {
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to install signal handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                () = ctrl_c => {
                    info!("Received Ctrl+C, shutting down");
                },
                () = terminate => {
                    info!("Received SIGTERM, shutting down");
                },
            }
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .context("Server error")?;

        info!("Server shutdown complete");

        Ok(())
    }
}

/// Query parameters accepted by the index page.
#[derive(Debug, Deserialize)]
struct PageQuery {
    country: Option<String>,
}

/// Resolve the effective country from the query parameter, if any.
fn resolve_country(
    requested: Option<&str>,
    default_country: CountryCode,
) -> Result<CountryCode, UnknownCountry> {
    match requested {
        Some(raw) => raw.parse(),
        None => Ok(default_country),
    }
}

fn error_page_response(status: StatusCode, message: &str) -> Response {
    (status, Html(render_error_page(message))).into_response()
}

async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    match build_page(&state, &query).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            if let Some(unknown) = e.downcast_ref::<UnknownCountry>() {
                warn!(error = %unknown, "Rejected request");
                error_page_response(StatusCode::BAD_REQUEST, &unknown.to_string())
            } else {
                error!(error = %e, "Failed to build identity page");
                error_page_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
            }
        }
    }
}

async fn build_page(state: &AppState, query: &PageQuery) -> Result<String> {
    let country = resolve_country(query.country.as_deref(), state.default_country)?;
    let identity = state.generator.generate(country).await;
    Ok(render_page(&identity))
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_country_uses_default() {
        let country = resolve_country(None, CountryCode::Ch).unwrap();
        assert_eq!(country, CountryCode::Ch);
    }

    #[test]
    fn test_resolve_country_parses_query() {
        let country = resolve_country(Some("au"), CountryCode::Ch).unwrap();
        assert_eq!(country, CountryCode::Au);
    }

    #[test]
    fn test_resolve_country_rejects_unknown() {
        let err = resolve_country(Some("XX"), CountryCode::Au).unwrap_err();
        assert_eq!(err, UnknownCountry("XX".to_string()));
    }
}

//! LexNum API Server implementation
//!
//! HTTP server using Axum. Serves the form endpoints used by the web page
//! (`/convertir_texto`, `/convertir_excel`) and a versioned JSON API.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::handlers;
use crate::config::{ApiConfig, DEFAULT_LOG_FILTER};
use crate::core::Converter;
use crate::error::LexNumResult;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub config: ApiConfig,
    pub converter: Converter,
}

impl AppState {
    pub fn new(config: ApiConfig) -> LexNumResult<Self> {
        let converter = config.converter()?;
        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            converter,
        })
    }
}

/// Build the router with all routes and layers. Separate from
/// [`run_api_server`] so tests can drive it without a socket.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Web form endpoints
        .route("/convertir_texto", post(handlers::convertir_texto))
        .route("/convertir_excel", post(handlers::convertir_excel))
        // JSON API
        .route("/api/v1/convert", post(handlers::convert))
        .route("/api/v1/convert/batch", post(handlers::convert_batch))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        // State and middleware
        .with_state(state)
        .layer(cors)
        // Outside CORS so preflight answers get the headers too
        .layer(middleware::map_response(add_security_headers))
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .init();

    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(config)?);
    let app = build_router(Arc::clone(&state));

    info!("LexNum API Server starting on http://{}", addr);
    info!("   Endpoints: /convertir_texto, /convertir_excel, /api/v1/convert, /api/v1/convert/batch");
    info!(
        "   Health: /health, Version: /version, Max upload: {} MB, Max amount: {} pesos",
        state.config.max_file_size_mb, state.config.max_pesos
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("LexNum API Server shutdown complete");
    Ok(())
}

/// An explicit `--log-level` wins, then `RUST_LOG`, then the default filter.
fn log_filter(config: &ApiConfig) -> EnvFilter {
    match &config.log_filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

/// Headers added to every response, including errors and fallbacks.
async fn add_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    response
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== AppState Tests ====================

    #[test]
    fn test_app_state_from_default_config() {
        let state = AppState::new(ApiConfig::default()).unwrap();
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(state.converter.max_pesos(), 999_999_999);
    }

    #[test]
    fn test_app_state_rejects_bad_ceiling() {
        let config = ApiConfig {
            max_pesos: u64::MAX,
            ..Default::default()
        };
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn test_app_state_in_arc() {
        let state = Arc::new(AppState::new(ApiConfig::default()).unwrap());
        let state_clone = Arc::clone(&state);
        assert_eq!(state.version, state_clone.version);
        assert_eq!(Arc::strong_count(&state), 2);
    }

    #[test]
    fn test_explicit_log_level_is_used_as_is() {
        let config = ApiConfig {
            log_filter: Some("lexnum=debug".to_string()),
            ..Default::default()
        };
        assert_eq!(log_filter(&config).to_string(), "lexnum=debug");
    }

    #[tokio::test]
    async fn test_security_headers_added() {
        let response = add_security_headers(Response::new(axum::body::Body::empty())).await;
        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["pragma"], "no-cache");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert!(headers["cache-control"]
            .to_str()
            .unwrap()
            .starts_with("no-store"));
    }
}

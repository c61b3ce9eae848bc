//! # SXM HTTP API Module
//!
//! Stateless REST API over the assessment engine, built on axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /questions` - The question set with its options
//! - `POST /assess` - Score a set of answers
//! - `POST /report` - Download the plain-text report
//! - `POST /share` - Build LinkedIn/Twitter share links
//! - `POST /notify` - Request the result by email
//!
//! ## Configuration (Environment Variables)
//!
//! - `SXM_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `SXM_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    assess_handler, health_handler, notify_handler, questions_handler, report_handler,
    share_handler, status_for,
};
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    AnswerJson, AssessRequest, AssessResponse, ErrorResponse, HealthResponse, MAX_EMAIL_LENGTH,
    MAX_SHARE_URL_LENGTH, NotifyRequest, NotifyResponse, QuestionsResponse, ShareRequest,
    ShareResponse,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use sxm_core::{AcknowledgingNotifier, Content, ResultNotifier, SxmError};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB); answer sets are tiny.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    /// The content bundle every request is scored against.
    pub content: Arc<Content>,
    /// Where `/notify` hands results.
    pub notifier: Arc<dyn ResultNotifier>,
}

impl AppState {
    /// State over a content bundle with the acknowledging notifier.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self::with_notifier(content, Arc::new(AcknowledgingNotifier))
    }

    /// State with a custom notifier.
    #[must_use]
    pub fn with_notifier(content: Content, notifier: Arc<dyn ResultNotifier>) -> Self {
        Self {
            content: Arc::new(content),
            notifier,
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `SXM_CORS_ORIGINS`.
///
/// - `"*"`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("SXM_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (SXM_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in SXM_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
                    .expose_headers([header::CONTENT_DISPOSITION])
            }
        }
        None => {
            tracing::info!("CORS: No SXM_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/questions", get(handlers::questions_handler))
        .route("/assess", post(handlers::assess_handler))
        .route("/report", post(handlers::report_handler))
        .route("/share", post(handlers::share_handler))
        .route("/notify", post(handlers::notify_handler));

    if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, content: Content) -> Result<(), SxmError> {
    let router = create_router(AppState::new(content));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SxmError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("SXM HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SxmError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! Spendwise Web Server
//!
//! Axum-based REST API for the Spendwise expense insights pipeline.
//!
//! Security features:
//! - Bearer API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Request validation before anything reaches the pipeline
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use spendwise_core::{Clock, InsightConfig, InsightEngine, SystemClock};

mod handlers;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

impl ServerConfig {
    /// Read API keys and CORS origins from `SPENDWISE_API_KEYS` and
    /// `SPENDWISE_ALLOWED_ORIGINS` (both comma-separated)
    pub fn from_env(require_auth: bool) -> Self {
        Self {
            require_auth,
            allowed_origins: std::env::var("SPENDWISE_ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            api_keys: std::env::var("SPENDWISE_API_KEYS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Split a comma-separated setting, dropping blanks
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub engine: InsightEngine,
    /// Source of "now" for the weekly trend window
    pub clock: Arc<dyn Clock>,
    pub config: ServerConfig,
}

/// Authentication middleware - validates bearer API keys
///
/// API keys are compared in constant time to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key.trim(), &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    AppError::unauthorized("Authentication required").into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Create the application router using the wall clock
pub fn create_router(insights: InsightConfig, config: ServerConfig) -> Router {
    create_router_with_clock(insights, config, Arc::new(SystemClock))
}

/// Create the application router with an injected clock (for testing)
pub fn create_router_with_clock(
    insights: InsightConfig,
    config: ServerConfig,
    clock: Arc<dyn Clock>,
) -> Router {
    let state = Arc::new(AppState {
        engine: InsightEngine::with_config(insights),
        clock,
        config: config.clone(),
    });

    let protected_routes = Router::new()
        .route("/insights", post(handlers::generate_insights))
        .route("/reports/monthly", post(handlers::monthly_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes);

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    insights: InsightConfig,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        warn!("⚠️  No API keys configured (set SPENDWISE_API_KEYS) - every request will be rejected");
    }

    let app = create_router(insights, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// API error: a status code and a message safe to show clients
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
        }
    }
}

impl From<spendwise_core::Error> for AppError {
    /// Invalid input is the caller's fault; anything else is logged and hidden
    fn from(err: spendwise_core::Error) -> Self {
        match err {
            spendwise_core::Error::InvalidData(_)
            | spendwise_core::Error::Json(_)
            | spendwise_core::Error::Csv(_) => {
                warn!(error = %err, "Rejected request");
                Self::bad_request(&err.to_string())
            }
            spendwise_core::Error::Io(_) | spendwise_core::Error::Config(_) => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "An internal error occurred".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests;

//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);
    let body_limit = state.config.body_limit_bytes();

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Moon and sky rating
        .route("/moon-phase", get(handlers::get_moon_phase))
        .route("/stargazing-score", post(handlers::post_stargazing_score))
        .route("/conditions", post(handlers::post_conditions))
        .route("/forecast/outlook", post(handlers::post_forecast_outlook))
        // Locations
        .route("/dark-sky-sites", get(handlers::get_dark_sky_sites))
        .route("/distance", get(handlers::get_distance))
        // Photo analysis boundary
        .route("/photo-analysis/check", post(handlers::post_photo_check))
        .route("/photo-analysis/decode", post(handlers::post_photo_decode))
        // Visit tracking
        .route("/visits", get(handlers::list_visits).post(handlers::post_visit))
        .route("/visits/{session_id}", get(handlers::get_visit));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Uploads arrive base64-encoded inside JSON.
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured origins; any origin when the list is empty.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let state = AppState::new(repo, AppConfig::default());
        let _router = create_router(state);
        // If we got here, router was created successfully
    }

    #[test]
    fn test_router_with_open_cors() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let mut config = AppConfig::default();
        config.server.allowed_origins.clear();
        let _router = create_router(AppState::new(repo, config));
    }
}

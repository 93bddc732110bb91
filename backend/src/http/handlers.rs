//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! algorithms and service layer for the actual work.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::debug;

use super::dto::{
    ConditionsRequest, DarkSkyQuery, DarkSkyResponse, DistanceQuery, DistanceResponse,
    ForecastRequest, ForecastResponse, HealthResponse, MoonPhaseQuery, MoonPhaseResponse,
    PhotoCheckRequest, PhotoCheckResponse, StargazingScoreRequest, TrackVisitRequest, VisitDto,
    VisitListQuery, VisitListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::algorithms::{compute_moon_phase, compute_score_with_policy, haversine_km};
use crate::models::{GeographicLocation, PhotoAnalysis, StargazingScore, WeatherSnapshot};
use crate::services::{
    analysis_prompt, assess_conditions, nightly_outlook, suggest_dark_sky_sites,
    validate_image_payload, validate_location_name, ConditionsReport, DEFAULT_SUGGESTION_LIMIT,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_VISIT_LIMIT: usize = 20;
const MAX_VISIT_LIMIT: usize = 100;
const DEFAULT_ORIGIN_NAME: &str = "Your location";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let backend = state.repository.backend_name();
    let repo_status = match state.repository.health_check().await {
        Ok(true) => format!("{}: connected", backend),
        Ok(false) => format!("{}: disconnected", backend),
        Err(e) => format!("{}: error: {}", backend, e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Moon and score
// =============================================================================

/// GET /v1/moon-phase
///
/// Moon phase at `?at=` (RFC 3339), or now.
pub async fn get_moon_phase(Query(query): Query<MoonPhaseQuery>) -> HandlerResult<MoonPhaseResponse> {
    let at = query.at.unwrap_or_else(Utc::now);
    Ok(Json(MoonPhaseResponse::new(at, compute_moon_phase(at))))
}

/// POST /v1/stargazing-score
///
/// Rate a sky from raw weather numbers. Moon illumination is computed for
/// `at` (or now) when the caller does not supply it.
pub async fn post_stargazing_score(
    State(state): State<AppState>,
    Json(request): Json<StargazingScoreRequest>,
) -> HandlerResult<StargazingScore> {
    let moon = match request.moon_illumination {
        Some(illumination) => illumination,
        None => {
            let at = request.at.unwrap_or_else(Utc::now);
            compute_moon_phase(at).illumination_percent as f64
        }
    };
    let weather = WeatherSnapshot::from_partial(
        Some(request.cloud_cover),
        Some(request.humidity),
        request.visibility_km,
    );
    let policy = request.policy.unwrap_or(state.config.scoring.policy);

    Ok(Json(compute_score_with_policy(policy, &weather, moon)))
}

/// POST /v1/conditions
///
/// Full conditions report: moon, score, sky description and tip.
pub async fn post_conditions(
    State(state): State<AppState>,
    Json(request): Json<ConditionsRequest>,
) -> HandlerResult<ConditionsReport> {
    let weather =
        WeatherSnapshot::from_partial(request.cloud_cover, request.humidity, request.visibility_km);
    let at = request.at.unwrap_or_else(Utc::now);
    let policy = request.policy.unwrap_or(state.config.scoring.policy);

    Ok(Json(assess_conditions(&weather, at, policy)))
}

// =============================================================================
// Forecast
// =============================================================================

/// POST /v1/forecast/outlook
///
/// Rate each forecast night and flag the best one.
pub async fn post_forecast_outlook(
    Json(request): Json<ForecastRequest>,
) -> HandlerResult<ForecastResponse> {
    let nights = nightly_outlook(&request.days);
    let best_night = nights.iter().find(|n| n.best_night).map(|n| n.date);

    Ok(Json(ForecastResponse { nights, best_night }))
}

// =============================================================================
// Locations
// =============================================================================

/// GET /v1/dark-sky-sites
///
/// Candidate dark-sky sites around `?lat&lon`, best first.
pub async fn get_dark_sky_sites(
    Query(query): Query<DarkSkyQuery>,
) -> HandlerResult<DarkSkyResponse> {
    validate_coordinates(query.lat, query.lon)?;
    let name = match query.name.as_deref() {
        Some(raw) => validate_location_name(raw).map_err(AppError::BadRequest)?,
        None => DEFAULT_ORIGIN_NAME.to_string(),
    };
    let origin = GeographicLocation::new(name, query.lat, query.lon);
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);

    let sites = suggest_dark_sky_sites(&origin, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DarkSkyResponse {
        origin: origin.name,
        sites,
    }))
}

/// GET /v1/distance
///
/// Great-circle distance between two points, in whole kilometres.
pub async fn get_distance(Query(query): Query<DistanceQuery>) -> HandlerResult<DistanceResponse> {
    validate_coordinates(query.lat1, query.lon1)?;
    validate_coordinates(query.lat2, query.lon2)?;

    Ok(Json(DistanceResponse {
        distance_km: haversine_km(query.lat1, query.lon1, query.lat2, query.lon2),
    }))
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::BadRequest(format!(
            "latitude must be within [-90, 90], got {}",
            lat
        )));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(format!(
            "longitude must be within [-180, 180], got {}",
            lon
        )));
    }
    Ok(())
}

// =============================================================================
// Photo analysis
// =============================================================================

/// POST /v1/photo-analysis/check
///
/// Validate an upload before it is forwarded to the vision model.
pub async fn post_photo_check(
    State(state): State<AppState>,
    Json(request): Json<PhotoCheckRequest>,
) -> HandlerResult<PhotoCheckResponse> {
    let max_mb = state.config.analysis.max_image_size_mb;
    let payload = validate_image_payload(&request.image_base64, max_mb)?;
    debug!("accepted {} upload of {:.2}MB", payload.format.mime_type(), payload.size_mb);

    Ok(Json(PhotoCheckResponse {
        format: payload.format,
        mime_type: payload.format.mime_type().to_string(),
        size_bytes: payload.size_bytes,
        size_mb: payload.size_mb,
        max_size_mb: max_mb,
        prompt: analysis_prompt(),
    }))
}

/// POST /v1/photo-analysis/decode
///
/// Normalise a vision model answer into a sanitised analysis.
pub async fn post_photo_decode(
    Json(upstream): Json<serde_json::Value>,
) -> HandlerResult<PhotoAnalysis> {
    Ok(Json(PhotoAnalysis::from_upstream(&upstream)?))
}

// =============================================================================
// Visits
// =============================================================================

/// POST /v1/visits
///
/// Record a page view, continuing or rolling the caller's session.
pub async fn post_visit(
    State(state): State<AppState>,
    Json(request): Json<TrackVisitRequest>,
) -> HandlerResult<VisitDto> {
    let now = Utc::now();
    let record = state
        .visits
        .track_visit_at(request.session_id.as_deref(), request.page.as_deref(), now)
        .await?;

    Ok(Json(VisitDto::from_record(record, now)))
}

/// GET /v1/visits/{session_id}
///
/// Get one session.
pub async fn get_visit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<VisitDto> {
    let record = state.visits.get_visit(&session_id).await?;
    Ok(Json(VisitDto::from_record(record, Utc::now())))
}

/// GET /v1/visits
///
/// Most recently active sessions and the total session count.
pub async fn list_visits(
    State(state): State<AppState>,
    Query(query): Query<VisitListQuery>,
) -> HandlerResult<VisitListResponse> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_VISIT_LIMIT)
        .min(MAX_VISIT_LIMIT);
    let now = Utc::now();

    let visits = state
        .visits
        .recent_visits(limit)
        .await?
        .into_iter()
        .map(|record| VisitDto::from_record(record, now))
        .collect();
    let total_visits = state.visits.total_visits().await?;

    Ok(Json(VisitListResponse {
        visits,
        total_visits,
    }))
}

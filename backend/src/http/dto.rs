//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies and query strings are deserialised into these types; most
//! responses either reuse a model directly or flatten it for the frontend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{
    ConditionsReport, ForecastDay, ImageFormat, LunarPhase, MoonPhase, NightOutlook,
    PhotoAnalysis, ScoringPolicy, StargazingScore, Visibility, VisitRecord,
};
use crate::models::DarkSkySite;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository backend and its status
    pub repository: String,
}

/// Query parameters for the moon phase endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MoonPhaseQuery {
    /// Instant to evaluate (RFC 3339, default: now)
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Moon phase response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonPhaseResponse {
    pub evaluated_at: DateTime<Utc>,
    pub phase: LunarPhase,
    pub illumination_percent: u8,
    pub age_days: f64,
    /// Age rounded to whole days, as shown on the dashboard
    pub display_age: u32,
    pub waxing: bool,
}

impl MoonPhaseResponse {
    pub fn new(evaluated_at: DateTime<Utc>, moon: MoonPhase) -> Self {
        Self {
            evaluated_at,
            phase: moon.phase,
            illumination_percent: moon.illumination_percent,
            age_days: moon.age_days,
            display_age: moon.display_age(),
            waxing: moon.phase.is_waxing(),
        }
    }
}

/// Request body for a bare stargazing score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StargazingScoreRequest {
    pub cloud_cover: f64,
    pub humidity: f64,
    /// Moon illumination percent (default: computed for `at`)
    #[serde(default)]
    pub moon_illumination: Option<f64>,
    #[serde(default)]
    pub visibility_km: Option<Visibility>,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    /// Scoring policy (default: configured policy)
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,
}

/// Request body for a full conditions report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConditionsRequest {
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Kilometres, or a description such as `"12 km"`
    #[serde(default)]
    pub visibility_km: Option<Visibility>,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,
}

/// Request body for the forecast outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub days: Vec<ForecastDay>,
}

/// Forecast outlook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub nights: Vec<NightOutlook>,
    /// Date of the best night, if any night was rated
    pub best_night: Option<NaiveDate>,
}

/// Query parameters for dark-sky site suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarkSkyQuery {
    pub lat: f64,
    pub lon: f64,
    /// Observer location name (optional)
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum number of sites (default: 4)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Dark-sky site DTO with flattened coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarkSkySiteDto {
    pub name: String,
    pub description: String,
    pub dark_sky_rating: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub maps_url: String,
}

impl From<DarkSkySite> for DarkSkySiteDto {
    fn from(site: DarkSkySite) -> Self {
        Self {
            latitude: site.location.lat(),
            longitude: site.location.lon(),
            maps_url: site.location.maps_url(),
            name: site.name,
            description: site.description,
            dark_sky_rating: site.dark_sky_rating,
            distance_km: site.distance_km,
        }
    }
}

/// Dark-sky suggestions response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarkSkyResponse {
    pub origin: String,
    pub sites: Vec<DarkSkySiteDto>,
}

/// Query parameters for the distance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceQuery {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

/// Distance response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Request body for upload validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCheckRequest {
    /// `data:image/...;base64,...` URL
    pub image_base64: String,
}

/// Accepted upload, with the prompt to send alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCheckResponse {
    pub format: ImageFormat,
    pub mime_type: String,
    pub size_bytes: u64,
    pub size_mb: f64,
    pub max_size_mb: f64,
    pub prompt: String,
}

/// Request body for recording a visit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackVisitRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

/// Visit DTO for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitDto {
    pub session_id: String,
    pub total_visits: u64,
    pub session_start: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
    pub session_duration_secs: i64,
    pub pages_viewed: Vec<String>,
}

impl VisitDto {
    pub fn from_record(record: VisitRecord, now: DateTime<Utc>) -> Self {
        Self {
            session_duration_secs: record.session_duration_secs(now),
            session_id: record.session_id,
            total_visits: record.total_visits,
            session_start: record.session_start,
            last_visit: record.last_visit,
            pages_viewed: record.pages_viewed,
        }
    }
}

/// Query parameters for listing visits.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisitListQuery {
    /// Maximum number of sessions (default: 20)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Visit list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitListResponse {
    pub visits: Vec<VisitDto>,
    pub total_visits: u64,
}

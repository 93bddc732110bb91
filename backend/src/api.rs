//! Public API surface for the backend.
//!
//! This file consolidates the types that cross the HTTP boundary and the
//! entry points most callers need, so downstream code can depend on
//! `celestial_watch::api` alone.

pub use crate::models::DarkSkySite;
pub use crate::models::GeographicLocation;
pub use crate::models::ImageFormat;
pub use crate::models::LunarPhase;
pub use crate::models::MoonPhase;
pub use crate::models::PhotoAnalysis;
pub use crate::models::RatingBand;
pub use crate::models::ScoringPolicy;
pub use crate::models::StargazingScore;
pub use crate::models::Visibility;
pub use crate::models::VisitId;
pub use crate::models::VisitRecord;
pub use crate::models::WeatherSnapshot;
pub use crate::services::ConditionsReport;
pub use crate::services::ForecastDay;
pub use crate::services::ImagePayload;
pub use crate::services::NightOutlook;

pub use crate::algorithms::compute_moon_phase;
pub use crate::algorithms::compute_score;
pub use crate::algorithms::compute_score_with_policy;
pub use crate::algorithms::haversine_km;

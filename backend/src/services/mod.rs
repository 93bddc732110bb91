//! Service layer for the dashboard features.
//!
//! Services sit between the HTTP handlers and the pure algorithms: they join
//! weather, moon and location inputs into the reports the frontend renders,
//! and orchestrate repository calls for visit tracking.

pub mod conditions;

pub mod dark_sky;

pub mod forecast;

pub mod photo_analysis;
pub mod sanitize;

pub mod visits;

pub use conditions::{assess_conditions, astrophotography_tip, ConditionsReport};
pub use dark_sky::{site_score, suggest_dark_sky_sites, DEFAULT_SUGGESTION_LIMIT};
pub use forecast::{nightly_outlook, ForecastDay, NightOutlook};
pub use photo_analysis::{
    analysis_prompt, validate_image_payload, ImagePayload, PhotoAnalysisError,
    DEFAULT_MAX_IMAGE_SIZE_MB,
};
pub use sanitize::{public_error_message, sanitize_text, validate_location_name};
pub use visits::VisitTracker;

//! Tonight's observing conditions.
//!
//! Joins the weather snapshot with the moon phase at the same instant and
//! derives what the dashboard cards show from the pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::{compute_moon_phase, compute_score_with_policy};
use crate::models::{sky_description, MoonPhase, ScoringPolicy, StargazingScore, WeatherSnapshot};

/// Rating from which a night is recommended for astrophotography.
pub const ASTROPHOTOGRAPHY_MIN_RATING: u8 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsReport {
    pub evaluated_at: DateTime<Utc>,
    pub weather: WeatherSnapshot,
    pub moon: MoonPhase,
    pub score: StargazingScore,
    pub sky_description: String,
    pub astrophotography_tip: String,
}

impl ConditionsReport {
    pub fn good_for_astrophotography(&self) -> bool {
        self.score.rating >= ASTROPHOTOGRAPHY_MIN_RATING
    }
}

/// Assess conditions for `weather` at `instant`.
pub fn assess_conditions(
    weather: &WeatherSnapshot,
    instant: DateTime<Utc>,
    policy: ScoringPolicy,
) -> ConditionsReport {
    let moon = compute_moon_phase(instant);
    let score = compute_score_with_policy(policy, weather, moon.illumination_percent as f64);

    ConditionsReport {
        evaluated_at: instant,
        weather: *weather,
        moon,
        sky_description: sky_description(weather.cloud_cover_percent).to_string(),
        astrophotography_tip: astrophotography_tip(score.rating).to_string(),
        score,
    }
}

/// One-line go/no-go hint for astrophotographers.
pub fn astrophotography_tip(rating: u8) -> &'static str {
    if rating >= ASTROPHOTOGRAPHY_MIN_RATING {
        "Great night for astrophotography!"
    } else {
        "Consider waiting for clearer skies."
    }
}

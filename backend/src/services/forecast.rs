//! Nightly outlook for a multi-day forecast.
//!
//! The provider gives one row per day; each is rated for the night that
//! follows it, using the moon phase at 22:00 UTC of that date.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::{clamp_percent, compute_moon_phase, compute_score};
use crate::models::{sky_description, MoonPhase, StargazingScore};

/// Hour (UTC) at which each night is evaluated.
pub const NIGHT_EVALUATION_HOUR: u32 = 22;

/// One day of provider forecast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
}

/// Derived outlook for one night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightOutlook {
    pub date: NaiveDate,
    /// Short weekday label, e.g. `"Mon"`.
    pub weekday: String,
    pub max_temp: i64,
    pub min_temp: i64,
    pub cloud_cover: f64,
    pub description: String,
    pub moon: MoonPhase,
    pub score: StargazingScore,
    pub best_night: bool,
}

/// Rate each forecast night and flag the best one.
///
/// Output keeps input order. Ties for best go to the earliest night.
pub fn nightly_outlook(days: &[ForecastDay]) -> Vec<NightOutlook> {
    let mut outlook: Vec<NightOutlook> = days.iter().map(rate_night).collect();

    let best = outlook
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.score.rating.cmp(&b.score.rating).then(ib.cmp(ia)))
        .map(|(i, _)| i);

    if let Some(i) = best {
        outlook[i].best_night = true;
    }
    outlook
}

fn rate_night(day: &ForecastDay) -> NightOutlook {
    let evening = day
        .date
        .and_time(NaiveTime::from_hms_opt(NIGHT_EVALUATION_HOUR, 0, 0).unwrap_or_default());
    let moon = compute_moon_phase(Utc.from_utc_datetime(&evening));

    let cloud_cover = clamp_percent(day.cloud_cover.unwrap_or(0.0));
    // Daily rows carry no humidity; treat it as neutral.
    let score = compute_score(cloud_cover, 0.0, moon.illumination_percent as f64);

    NightOutlook {
        date: day.date,
        weekday: day.date.format("%a").to_string(),
        max_temp: round_temp(day.max_temp),
        min_temp: round_temp(day.min_temp),
        cloud_cover,
        description: sky_description(cloud_cover).to_string(),
        moon,
        score,
        best_night: false,
    }
}

fn round_temp(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

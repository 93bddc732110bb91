//! Stargazing suitability estimator.
//!
//! Two rating formulas exist. [`ScoringPolicy::Additive`] is the canonical one
//! and the only one reachable through [`compute_score`]; the continuous
//! formula must be selected explicitly.

use log::debug;

use crate::algorithms::geo::clamp_percent;
use crate::models::{
    RatingBand, ScoringPolicy, StargazingScore, WeatherSnapshot, MAX_RATING, MIN_RATING,
};

/// Moon illumination below which the whole night counts as dark, in percent.
pub const DARK_MOON_THRESHOLD: f64 = 30.0;

/// Rate the sky with the canonical additive policy.
///
/// All inputs are percentages; out-of-range and NaN values are clamped first.
pub fn compute_score(
    cloud_cover_percent: f64,
    humidity_percent: f64,
    moon_illumination_percent: f64,
) -> StargazingScore {
    let moon = clamp_percent(moon_illumination_percent);
    let rating = additive_rating(
        clamp_percent(cloud_cover_percent),
        clamp_percent(humidity_percent),
        moon,
    );
    build_score(rating, moon)
}

/// Rate the sky with an explicitly chosen policy.
pub fn compute_score_with_policy(
    policy: ScoringPolicy,
    weather: &WeatherSnapshot,
    moon_illumination_percent: f64,
) -> StargazingScore {
    // Re-clamp: the fields are public and may have been set directly.
    let weather = WeatherSnapshot::new(
        weather.cloud_cover_percent,
        weather.humidity_percent,
        weather.visibility_km,
    );
    let moon = clamp_percent(moon_illumination_percent);

    let rating = match policy {
        ScoringPolicy::Additive => {
            additive_rating(weather.cloud_cover_percent, weather.humidity_percent, moon)
        }
        ScoringPolicy::Continuous => continuous_rating(&weather),
    };

    debug!(
        "stargazing rating {} (policy={}, cloud={}, humidity={}, visibility_km={}, moon={})",
        rating,
        policy,
        weather.cloud_cover_percent,
        weather.humidity_percent,
        weather.visibility_km,
        moon
    );

    build_score(rating, moon)
}

/// Stepwise deductions from a perfect 10.
fn additive_rating(cloud: f64, humidity: f64, moon: f64) -> u8 {
    let mut rating: i32 = MAX_RATING as i32;

    rating -= if cloud > 80.0 {
        6
    } else if cloud > 50.0 {
        4
    } else if cloud > 20.0 {
        2
    } else {
        0
    };

    rating -= if moon > 80.0 {
        3
    } else if moon > 50.0 {
        2
    } else {
        0
    };

    if humidity > 80.0 {
        rating -= 1;
    }

    clamp_rating(rating as f64)
}

/// Proportional cloud penalty with humidity and visibility steps.
fn continuous_rating(weather: &WeatherSnapshot) -> u8 {
    let mut score = MAX_RATING as f64;

    score -= (weather.cloud_cover_percent / 100.0) * 6.0;

    score -= if weather.humidity_percent > 80.0 {
        2.0
    } else if weather.humidity_percent > 60.0 {
        1.0
    } else {
        0.0
    };

    score -= if weather.visibility_km < 5.0 {
        2.0
    } else if weather.visibility_km < 10.0 {
        1.0
    } else {
        0.0
    };

    clamp_rating(score.round())
}

fn clamp_rating(value: f64) -> u8 {
    value.clamp(MIN_RATING as f64, MAX_RATING as f64) as u8
}

/// Suggested viewing window given the moon's brightness.
pub fn best_viewing_time(moon_illumination_percent: f64) -> &'static str {
    if clamp_percent(moon_illumination_percent) < DARK_MOON_THRESHOLD {
        "All night - minimal moonlight"
    } else {
        "After the moon sets"
    }
}

fn build_score(rating: u8, moon: f64) -> StargazingScore {
    let band = RatingBand::from_rating(rating);
    StargazingScore {
        rating,
        band,
        recommendation: band.recommendation().to_string(),
        best_viewing_time: best_viewing_time(moon).to_string(),
    }
}

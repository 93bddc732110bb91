//! Moon phase model.
//!
//! Counts days from a known new moon, folds them into one synodic month and
//! maps the resulting cycle fraction onto eight equal-width phase bins. The
//! illumination curve is a piecewise-linear approximation, flat across the
//! quarter and full bins, which is what the dashboard has always displayed.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{LunarPhase, MoonPhase};

/// Mean length of a lunation in days.
pub const SYNODIC_PERIOD_DAYS: f64 = 29.530588853;

/// Unix timestamp of the reference new moon, 2000-01-06T18:14:00Z.
pub const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const BIN_WIDTH: f64 = 0.125;

/// The reference new moon as a UTC instant.
pub fn reference_new_moon() -> DateTime<Utc> {
    Utc.timestamp_opt(REFERENCE_NEW_MOON_UNIX, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Fractional days between the reference new moon and `instant`.
///
/// Negative for instants before the reference.
pub fn days_since_reference(instant: DateTime<Utc>) -> f64 {
    let delta = instant.signed_duration_since(reference_new_moon());
    delta.num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Compute the moon phase at `instant`.
pub fn compute_moon_phase(instant: DateTime<Utc>) -> MoonPhase {
    moon_phase_from_age(days_since_reference(instant))
}

/// Build a [`MoonPhase`] from a day count relative to any new moon.
///
/// The count is folded with a floored modulo, so negative inputs still give a
/// non-negative age.
pub fn moon_phase_from_age(days: f64) -> MoonPhase {
    let days = if days.is_finite() { days } else { 0.0 };
    let mut age = days.rem_euclid(SYNODIC_PERIOD_DAYS);
    // rem_euclid may return the divisor itself for tiny negative inputs.
    if age >= SYNODIC_PERIOD_DAYS {
        age = 0.0;
    }

    let (phase, illumination) = phase_at_fraction(age / SYNODIC_PERIOD_DAYS);

    MoonPhase {
        phase,
        illumination_percent: illumination.clamp(0.0, 100.0).round() as u8,
        age_days: age,
    }
}

/// Phase bin and unrounded illumination for a cycle fraction in [0, 1).
pub fn phase_at_fraction(fraction: f64) -> (LunarPhase, f64) {
    let fraction = if fraction.is_finite() {
        fraction.rem_euclid(1.0)
    } else {
        0.0
    };
    let phase = LunarPhase::from_bin((fraction / BIN_WIDTH).floor() as usize);

    let illumination = match phase {
        LunarPhase::NewMoon => 0.0,
        LunarPhase::WaxingCrescent => fraction * 4.0 * 50.0,
        LunarPhase::FirstQuarter => 50.0,
        LunarPhase::WaxingGibbous => 50.0 + (fraction - 0.25) * 4.0 * 50.0,
        LunarPhase::FullMoon => 100.0,
        LunarPhase::WaningGibbous => 100.0 - (fraction - 0.5) * 4.0 * 50.0,
        LunarPhase::LastQuarter => 50.0,
        LunarPhase::WaningCrescent => 50.0 - (fraction - 0.75) * 4.0 * 50.0,
    };

    (phase, illumination)
}

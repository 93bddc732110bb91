//! Pure celestial-condition computations.
//!
//! Everything here is synchronous, allocation-light and side-effect free.

pub mod geo;
pub mod moon_phase;
pub mod stargazing;

pub use geo::{clamp_percent, haversine_km, EARTH_RADIUS_KM};
pub use moon_phase::{compute_moon_phase, moon_phase_from_age, phase_at_fraction, SYNODIC_PERIOD_DAYS};
pub use stargazing::{best_viewing_time, compute_score, compute_score_with_policy};

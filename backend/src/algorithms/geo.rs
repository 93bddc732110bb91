//! Great-circle distance and shared numeric helpers.

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Clamp a percentage into [0, 100].
///
/// NaN is treated as 0 so that a missing upstream field never poisons a rating.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamp a non-negative quantity, mapping NaN to `fallback`.
pub fn clamp_non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        return fallback;
    }
    value.max(0.0)
}

/// Great-circle distance between two points, rounded to the nearest kilometre.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
///
/// # Returns
///
/// Distance in km, always `>= 0`.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();

    let a = half_lat * half_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_lon * half_lon;
    // Rounding error can push `a` slightly outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c).round()
}

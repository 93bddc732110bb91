use serde::{Deserialize, Serialize};

use crate::algorithms::geo::{clamp_non_negative, clamp_percent};

/// Visibility assumed when the provider omits it, in km.
pub const DEFAULT_VISIBILITY_KM: f64 = 10.0;

/// Current weather as supplied by the external provider.
///
/// Always constructed through [`WeatherSnapshot::new`] so every field is
/// already within range when it reaches the estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub cloud_cover_percent: f64,
    pub humidity_percent: f64,
    pub visibility_km: f64,
}

impl WeatherSnapshot {
    pub fn new(cloud_cover_percent: f64, humidity_percent: f64, visibility_km: f64) -> Self {
        Self {
            cloud_cover_percent: clamp_percent(cloud_cover_percent),
            humidity_percent: clamp_percent(humidity_percent),
            visibility_km: clamp_non_negative(visibility_km, DEFAULT_VISIBILITY_KM),
        }
    }

    /// Build a snapshot from optional provider fields, defaulting missing ones
    /// to neutral values (clear, dry, 10 km).
    pub fn from_partial(
        cloud_cover_percent: Option<f64>,
        humidity_percent: Option<f64>,
        visibility: Option<Visibility>,
    ) -> Self {
        Self::new(
            cloud_cover_percent.unwrap_or(0.0),
            humidity_percent.unwrap_or(0.0),
            visibility
                .map(|v| v.to_km())
                .unwrap_or(DEFAULT_VISIBILITY_KM),
        )
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_VISIBILITY_KM)
    }
}

/// Visibility as it arrives from the various call sites.
///
/// Open-Meteo reports metres, some cards pass kilometres, and older payloads
/// carry a descriptive string such as `"12 km"` or `"good"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    Kilometers(f64),
    Described(String),
}

impl Visibility {
    pub fn from_meters(meters: f64) -> Self {
        Visibility::Kilometers(meters / 1000.0)
    }

    /// Normalise to kilometres. Unparseable descriptions fall back to the
    /// neutral default.
    pub fn to_km(&self) -> f64 {
        match self {
            Visibility::Kilometers(km) => clamp_non_negative(*km, DEFAULT_VISIBILITY_KM),
            Visibility::Described(text) => parse_visibility_text(text),
        }
    }
}

fn parse_visibility_text(text: &str) -> f64 {
    let lower = text.trim().to_lowercase();

    match lower.as_str() {
        "excellent" | "very good" => return 20.0,
        "good" => return 10.0,
        "moderate" => return 5.0,
        "poor" => return 2.0,
        "very poor" | "fog" => return 0.5,
        _ => {}
    }

    let numeric: String = lower
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let Ok(value) = numeric.parse::<f64>() else {
        return DEFAULT_VISIBILITY_KM;
    };
    let unit = lower[numeric.len()..].trim();

    if unit.starts_with("km") || unit.is_empty() {
        clamp_non_negative(value, DEFAULT_VISIBILITY_KM)
    } else if unit.starts_with("mi") {
        clamp_non_negative(value * 1.609_344, DEFAULT_VISIBILITY_KM)
    } else if unit.starts_with('m') {
        clamp_non_negative(value / 1000.0, DEFAULT_VISIBILITY_KM)
    } else {
        DEFAULT_VISIBILITY_KM
    }
}

/// Short sky description from cloud cover, as shown on forecast rows.
pub fn sky_description(cloud_cover_percent: f64) -> &'static str {
    let cloud = clamp_percent(cloud_cover_percent);
    if cloud < 20.0 {
        "Clear"
    } else if cloud < 50.0 {
        "Partly Cloudy"
    } else if cloud < 80.0 {
        "Cloudy"
    } else {
        "Overcast"
    }
}

/// Description for a WMO weather interpretation code.
pub fn weather_code_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_clamps_inputs() {
        let snap = WeatherSnapshot::new(140.0, -3.0, -1.0);
        assert_eq!(snap.cloud_cover_percent, 100.0);
        assert_eq!(snap.humidity_percent, 0.0);
        assert_eq!(snap.visibility_km, 0.0);
    }

    #[test]
    fn test_snapshot_from_partial_defaults() {
        let snap = WeatherSnapshot::from_partial(None, Some(55.0), None);
        assert_eq!(snap.cloud_cover_percent, 0.0);
        assert_eq!(snap.humidity_percent, 55.0);
        assert_eq!(snap.visibility_km, DEFAULT_VISIBILITY_KM);
        assert_eq!(WeatherSnapshot::default(), WeatherSnapshot::from_partial(None, None, None));
    }

    #[test]
    fn test_visibility_normalisation() {
        assert_eq!(Visibility::from_meters(24140.0).to_km(), 24.14);
        assert_eq!(Visibility::Kilometers(7.5).to_km(), 7.5);
        assert_eq!(Visibility::Described("12 km".into()).to_km(), 12.0);
        assert_eq!(Visibility::Described("800m".into()).to_km(), 0.8);
        assert_eq!(Visibility::Described("Good".into()).to_km(), 10.0);
        assert_eq!(Visibility::Described("fog".into()).to_km(), 0.5);
        assert_eq!(
            Visibility::Described("unlimited".into()).to_km(),
            DEFAULT_VISIBILITY_KM
        );
    }

    #[test]
    fn test_visibility_untagged_deserialize() {
        let v: Visibility = serde_json::from_str("3.2").unwrap();
        assert_eq!(v, Visibility::Kilometers(3.2));
        let v: Visibility = serde_json::from_str("\"5 km\"").unwrap();
        assert_eq!(v.to_km(), 5.0);
    }

    #[test]
    fn test_sky_description_thresholds() {
        assert_eq!(sky_description(0.0), "Clear");
        assert_eq!(sky_description(19.9), "Clear");
        assert_eq!(sky_description(20.0), "Partly Cloudy");
        assert_eq!(sky_description(50.0), "Cloudy");
        assert_eq!(sky_description(80.0), "Overcast");
        assert_eq!(sky_description(250.0), "Overcast");
    }

    #[test]
    fn test_weather_code_description() {
        assert_eq!(weather_code_description(0), "Clear sky");
        assert_eq!(weather_code_description(48), "Depositing rime fog");
        assert_eq!(weather_code_description(65), "Heavy rain");
        assert_eq!(weather_code_description(95), "Unknown");
    }
}

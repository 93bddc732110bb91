use qtty::{Degrees, Kilometers};
use serde::{Deserialize, Serialize};

use crate::algorithms::geo::haversine_km;

/// A named point on the Earth's surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographicLocation {
    pub name: String,
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl GeographicLocation {
    /// Create a location, clamping latitude to [-90, 90] and wrapping
    /// longitude into [-180, 180).
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        let latitude = if latitude.is_finite() {
            latitude.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        let longitude = if longitude.is_finite() {
            (longitude + 180.0).rem_euclid(360.0) - 180.0
        } else {
            0.0
        };

        Self {
            name: name.into(),
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }

    pub fn lat(&self) -> f64 {
        self.latitude.value()
    }

    pub fn lon(&self) -> f64 {
        self.longitude.value()
    }

    /// Location shifted by the given offsets, in degrees.
    pub fn offset(&self, name: impl Into<String>, d_lat: f64, d_lon: f64) -> Self {
        Self::new(name, self.lat() + d_lat, self.lon() + d_lon)
    }

    /// Great-circle distance to `other`, rounded to the nearest km.
    pub fn distance_to(&self, other: &GeographicLocation) -> Kilometers {
        Kilometers::new(haversine_km(self.lat(), self.lon(), other.lat(), other.lon()))
    }

    /// Link that opens this location in a web map.
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat(), self.lon())
    }
}

/// A suggested low light-pollution observing site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarkSkySite {
    pub name: String,
    pub description: String,
    /// 1-10, higher is darker.
    pub dark_sky_rating: u8,
    pub location: GeographicLocation,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_and_wraps() {
        let loc = GeographicLocation::new("Pole", 95.0, 190.0);
        assert_eq!(loc.lat(), 90.0);
        assert_eq!(loc.lon(), -170.0);

        let loc = GeographicLocation::new("West", -10.0, -181.0);
        assert_eq!(loc.lon(), 179.0);
    }

    #[test]
    fn test_non_finite_coordinates_fall_back_to_zero() {
        let loc = GeographicLocation::new("Nowhere", f64::NAN, f64::INFINITY);
        assert_eq!(loc.lat(), 0.0);
        assert_eq!(loc.lon(), 0.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let loc = GeographicLocation::new("Greenwich", 51.4769, 0.0);
        assert_eq!(loc.distance_to(&loc).value(), 0.0);
    }

    #[test]
    fn test_offset_and_distance() {
        let origin = GeographicLocation::new("Origin", 0.0, 0.0);
        let north = origin.offset("North", 1.0, 0.0);
        assert_eq!(north.lat(), 1.0);
        assert_eq!(origin.distance_to(&north).value(), 111.0);
    }

    #[test]
    fn test_maps_url() {
        let loc = GeographicLocation::new("Roque", 28.75, -17.5);
        assert_eq!(loc.maps_url(), "https://www.google.com/maps?q=28.75,-17.5");
    }
}

//! Dark-sky site suggestions around an observer.
//!
//! There is no site catalogue yet: candidates are fixed offsets from the
//! observer, each with a nominal dark-sky rating. They are ranked by a blend
//! of darkness (70%) and proximity (30%).

use log::debug;

use crate::models::{DarkSkySite, GeographicLocation};

/// Number of suggestions returned when the caller does not say.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 4;

struct SiteTemplate {
    name: &'static str,
    description: &'static str,
    d_lat: f64,
    d_lon: f64,
    dark_sky_rating: u8,
}

const SITE_TEMPLATES: [SiteTemplate; 5] = [
    SiteTemplate {
        name: "National Park Observatory",
        description: "Designated Dark Sky area with minimal light pollution",
        d_lat: 0.5,
        d_lon: 0.3,
        dark_sky_rating: 9,
    },
    SiteTemplate {
        name: "Mountain Peak Lookout",
        description: "High elevation site with excellent horizon views",
        d_lat: -0.3,
        d_lon: 0.4,
        dark_sky_rating: 8,
    },
    SiteTemplate {
        name: "Rural Observatory Site",
        description: "Remote location away from city lights",
        d_lat: 0.2,
        d_lon: -0.6,
        dark_sky_rating: 7,
    },
    SiteTemplate {
        name: "Desert Viewing Area",
        description: "Dry climate with exceptional atmospheric clarity",
        d_lat: -0.4,
        d_lon: -0.2,
        dark_sky_rating: 9,
    },
    SiteTemplate {
        name: "Lakeside Dark Zone",
        description: "Peaceful location with good northern sky access",
        d_lat: 0.6,
        d_lon: -0.1,
        dark_sky_rating: 6,
    },
];

/// Ranking score for a site: darker and closer is better.
pub fn site_score(dark_sky_rating: u8, distance_km: f64) -> f64 {
    (dark_sky_rating as f64 / 10.0) * 0.7 + (100.0 / (distance_km.max(0.0) + 10.0)) * 0.3
}

/// Best `limit` candidate sites around `origin`, highest score first.
pub fn suggest_dark_sky_sites(origin: &GeographicLocation, limit: usize) -> Vec<DarkSkySite> {
    let mut ranked: Vec<(f64, DarkSkySite)> = SITE_TEMPLATES
        .iter()
        .map(|t| {
            let location = origin.offset(t.name, t.d_lat, t.d_lon);
            let distance_km = origin.distance_to(&location).value();
            let site = DarkSkySite {
                name: t.name.to_string(),
                description: t.description.to_string(),
                dark_sky_rating: t.dark_sky_rating,
                location,
                distance_km,
            };
            (site_score(t.dark_sky_rating, distance_km), site)
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.truncate(limit);

    debug!(
        "suggested {} dark-sky sites around {} ({}, {})",
        ranked.len(),
        origin.name,
        origin.lat(),
        origin.lon()
    );

    ranked.into_iter().map(|(_, site)| site).collect()
}

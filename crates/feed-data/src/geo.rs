//! Geographic distance and the festival city centroid table.
//!
//! The nearby sort ranks posts by great-circle distance from the viewer to
//! the centroid of the post's city. City labels are free text entered at
//! upload time, so the lookup is an exact match against a curated table;
//! cities without a centroid simply sort last.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres, used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two points in kilometres (Haversine).
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Centroids for the cities whose fiestas show up in the feed.
///
/// Exact labels as used in the upload form; no fuzzy matching.
static CITY_CENTROIDS: &[(&str, Coordinates)] = &[
    ("Madrid", Coordinates { lat: 40.4168, lon: -3.7038 }),
    ("Barcelona", Coordinates { lat: 41.3874, lon: 2.1686 }),
    ("Valencia", Coordinates { lat: 39.4699, lon: -0.3763 }),
    ("Sevilla", Coordinates { lat: 37.3891, lon: -5.9845 }),
    ("Zaragoza", Coordinates { lat: 41.6488, lon: -0.8891 }),
    ("Málaga", Coordinates { lat: 36.7213, lon: -4.4214 }),
    ("Murcia", Coordinates { lat: 37.9922, lon: -1.1307 }),
    ("Bilbao", Coordinates { lat: 43.2630, lon: -2.9350 }),
    ("Alicante", Coordinates { lat: 38.3452, lon: -0.4810 }),
    ("Córdoba", Coordinates { lat: 37.8882, lon: -4.7794 }),
    ("Granada", Coordinates { lat: 37.1773, lon: -3.5986 }),
    ("Pamplona", Coordinates { lat: 42.8125, lon: -1.6458 }),
    ("Buñol", Coordinates { lat: 39.4200, lon: -0.7908 }),
    ("San Sebastián", Coordinates { lat: 43.3183, lon: -1.9812 }),
    ("Santiago de Compostela", Coordinates { lat: 42.8782, lon: -8.5448 }),
    ("Cádiz", Coordinates { lat: 36.5271, lon: -6.2886 }),
    ("Salamanca", Coordinates { lat: 40.9701, lon: -5.6635 }),
    ("Logroño", Coordinates { lat: 42.4627, lon: -2.4450 }),
    ("Valladolid", Coordinates { lat: 41.6523, lon: -4.7245 }),
    ("Palma", Coordinates { lat: 39.5696, lon: 2.6502 }),
];

/// Look up the centroid for a city label. `None` for unknown cities.
pub fn city_centroid(city: &str) -> Option<Coordinates> {
    CITY_CENTROIDS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|&(_, coords)| coords)
}

/// All city labels with a known centroid, for manual-entry fallbacks.
pub fn known_cities() -> impl Iterator<Item = &'static str> {
    CITY_CENTROIDS.iter().map(|(name, _)| *name)
}

use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Statute miles per degree of arc (60 nautical miles × 1.1515)
const MILES_PER_DEGREE: f64 = 60.0 * 1.1515;

const KILOMETERS_PER_MILE: f64 = 1.609344;
const NAUTICAL_MILES_PER_MILE: f64 = 0.8684;

/// Unit a distance is reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Kilometers,
    NauticalMiles,
    #[default]
    Miles,
}

impl DistanceUnit {
    /// Parse a unit code
    ///
    /// `K` and `N` are the short codes; unrecognised codes fall back to miles.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "k" | "km" | "kilometers" | "kilometres" => DistanceUnit::Kilometers,
            "n" | "nm" | "nautical" | "nautical_miles" => DistanceUnit::NauticalMiles,
            _ => DistanceUnit::Miles,
        }
    }

    #[inline]
    fn scale(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => KILOMETERS_PER_MILE,
            DistanceUnit::NauticalMiles => NAUTICAL_MILES_PER_MILE,
            DistanceUnit::Miles => 1.0,
        }
    }
}

/// Great-circle distance between two points via the spherical law of cosines
///
/// Identical points short-circuit to exactly zero. Inputs are not range
/// checked; out-of-range coordinates give a defined but meaningless result.
///
/// # Arguments
/// * `from` - First point in decimal degrees
/// * `to` - Second point in decimal degrees
/// * `unit` - Unit of the returned distance
#[inline]
pub fn distance(from: GeoPoint, to: GeoPoint, unit: DistanceUnit) -> f64 {
    if from.latitude == to.latitude && from.longitude == to.longitude {
        return 0.0;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let theta = (from.longitude - to.longitude).to_radians();

    let cosine = cosine_of_arc(lat1, lat2, theta);
    let degrees = cosine.acos().to_degrees();

    degrees * MILES_PER_DEGREE * unit.scale()
}

/// Cosine of the central angle, kept inside the domain of `acos`
#[inline]
fn cosine_of_arc(lat1: f64, lat2: f64, theta: f64) -> f64 {
    let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();
    cosine.clamp(-1.0, 1.0)
}

/// Shorthand for [`distance`] in kilometres
#[inline]
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    distance(from, to, DistanceUnit::Kilometers)
}

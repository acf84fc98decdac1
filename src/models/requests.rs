use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the school listing
///
/// When both `lat` and `lng` are present they override the stored position
/// for this request only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SchoolsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
}

impl SchoolsQuery {
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        }
    }
}

/// Request to store the text typed into the search box
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryUpdateRequest {
    #[validate(length(max = 200))]
    pub query: String,
}

/// Request to submit a search
///
/// Without `query` the stored search box text is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: Option<String>,
}

/// Request to set or clear the hovered school
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverRequest {
    #[serde(rename = "schoolId", default)]
    pub school_id: Option<String>,
}

/// Query string for an ad-hoc distance calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceQuery {
    #[serde(rename = "fromLat")]
    pub from_lat: f64,
    #[serde(rename = "fromLng")]
    pub from_lng: f64,
    #[serde(rename = "toLat")]
    pub to_lat: f64,
    #[serde(rename = "toLng")]
    pub to_lng: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

use crate::core::{DistanceUnit, SchoolCard, SortOrder};
use crate::models::GeolocationResult;
use serde::Serialize;

/// Response for the school listing
#[derive(Debug, Clone, Serialize)]
pub struct SchoolListResponse {
    pub schools: Vec<SchoolCard>,
    #[serde(rename = "sortedBy")]
    pub sorted_by: SortOrder,
    pub total: usize,
}

/// Response for a resolved search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub school: SchoolCard,
    /// Id of the list entry the page should scroll to
    #[serde(rename = "scrollTarget")]
    pub scroll_target: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistanceResponse {
    pub distance: f64,
    pub unit: DistanceUnit,
}

/// Response after a geolocation outcome was reported
#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    #[serde(rename = "positionValid")]
    pub position_valid: bool,
    pub outcome: GeolocationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct HoverResponse {
    pub hovered: Option<SchoolCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub schools: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub schools: usize,
    #[serde(rename = "positionResolved")]
    pub position_resolved: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}

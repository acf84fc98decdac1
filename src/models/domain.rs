use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinate range violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A point on the globe in decimal degrees
///
/// Fields are public so any pair of numbers can be fed to the distance
/// calculation; use [`GeoPoint::new`] when the range must be enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let point = Self { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::Longitude(self.longitude));
        }
        Ok(())
    }
}

/// A school as listed in the directory
///
/// Deserialization goes through [`SchoolRecord`], which accepts every
/// coordinate layout the schools API has served and normalises them into
/// `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchoolRecord")]
pub struct School {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "highestDegree")]
    pub highest_degree: String,
    pub county: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Reasons a wire record cannot become a [`School`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchoolRecordError {
    #[error("school {0} has an empty name")]
    EmptyName(String),

    #[error("school {0} has no coordinates")]
    MissingCoordinates(String),

    #[error("school {id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        id: String,
        #[source]
        source: CoordinateError,
    },
}

/// School ids arrive as either strings or numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// Nested `coordinates: { lat, long }` layout
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LegacyCoordinates {
    pub lat: f64,
    pub long: f64,
}

/// Wire shape of a school
///
/// Coordinates are resolved in order: `location`, then flat `lat`/`lng`,
/// then nested `coordinates`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRecord {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<LegacyCoordinates>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "highestDegree", default)]
    pub highest_degree: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl SchoolRecord {
    fn resolve_location(&self) -> Option<GeoPoint> {
        if let Some(location) = self.location {
            return Some(location);
        }
        if let (Some(latitude), Some(longitude)) = (self.lat, self.lng) {
            return Some(GeoPoint { latitude, longitude });
        }
        self.coordinates.map(|c| GeoPoint {
            latitude: c.lat,
            longitude: c.long,
        })
    }
}

impl TryFrom<SchoolRecord> for School {
    type Error = SchoolRecordError;

    fn try_from(record: SchoolRecord) -> Result<Self, Self::Error> {
        let location = record.resolve_location();
        let id = String::from(record.id);

        if record.name.is_empty() {
            return Err(SchoolRecordError::EmptyName(id));
        }

        let location = location.ok_or_else(|| SchoolRecordError::MissingCoordinates(id.clone()))?;
        if let Err(source) = location.validate() {
            return Err(SchoolRecordError::InvalidCoordinates { id, source });
        }

        Ok(School {
            id,
            name: record.name,
            location,
            kind: record.kind,
            highest_degree: record.highest_degree,
            county: record.county,
            state: record.state,
        })
    }
}

/// Outcome of one geolocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeolocationResult {
    Resolved(GeoPoint),
    Denied,
    Unavailable,
    TimedOut,
}

/// The user's position as far as the directory is concerned
///
/// Every geolocation outcome other than `Resolved` collapses to `Unresolved`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UserPosition {
    #[default]
    Unresolved,
    Resolved(GeoPoint),
}

impl UserPosition {
    pub fn is_valid(&self) -> bool {
        matches!(self, UserPosition::Resolved(_))
    }

    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            UserPosition::Resolved(point) => Some(*point),
            UserPosition::Unresolved => None,
        }
    }
}

impl From<GeolocationResult> for UserPosition {
    fn from(value: GeolocationResult) -> Self {
        match value {
            GeolocationResult::Resolved(point) => UserPosition::Resolved(point),
            GeolocationResult::Denied
            | GeolocationResult::Unavailable
            | GeolocationResult::TimedOut => UserPosition::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_lat_lng_record() {
        let school: School = serde_json::from_value(json!({
            "id": 7,
            "name": "Lakeside Academy",
            "lat": 47.6,
            "lng": -122.3,
            "type": "Private",
            "highestDegree": "High School Diploma",
            "county": "King County"
        }))
        .unwrap();

        assert_eq!(school.id, "7");
        assert_eq!(school.location, GeoPoint { latitude: 47.6, longitude: -122.3 });
        assert_eq!(school.state, None);
    }

    #[test]
    fn test_nested_coordinates_record() {
        let school: School = serde_json::from_value(json!({
            "id": "abc",
            "name": "Hillcrest College",
            "coordinates": { "lat": 40.0, "long": -75.0 },
            "type": "Public",
            "highestDegree": "Bachelor's",
            "county": "Chester County",
            "state": "PA"
        }))
        .unwrap();

        assert_eq!(school.location.longitude, -75.0);
        assert_eq!(school.state.as_deref(), Some("PA"));
    }

    #[test]
    fn test_canonical_layout_survives_serialization() {
        let school = School {
            id: "1".to_string(),
            name: "North High".to_string(),
            location: GeoPoint { latitude: 10.0, longitude: 20.0 },
            kind: "Public".to_string(),
            highest_degree: "Diploma".to_string(),
            county: "Polk County".to_string(),
            state: None,
        };

        let value = serde_json::to_value(&school).unwrap();
        assert_eq!(value["location"]["latitude"], 10.0);
        assert_eq!(value["type"], "Public");

        let back: School = serde_json::from_value(value).unwrap();
        assert_eq!(back, school);
    }

    #[test]
    fn test_record_without_coordinates_rejected() {
        let result = serde_json::from_value::<School>(json!({
            "id": 1,
            "name": "Nowhere High",
            "county": "Unknown"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_with_empty_name_rejected() {
        let record: SchoolRecord = serde_json::from_value(json!({
            "id": 2, "name": "", "lat": 1.0, "lng": 1.0
        }))
        .unwrap();
        assert_eq!(
            School::try_from(record),
            Err(SchoolRecordError::EmptyName("2".to_string()))
        );
    }

    #[test]
    fn test_geo_point_range() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert_eq!(GeoPoint::new(91.0, 0.0), Err(CoordinateError::Latitude(91.0)));
        assert_eq!(GeoPoint::new(0.0, -181.0), Err(CoordinateError::Longitude(-181.0)));
    }

    #[test]
    fn test_position_from_geolocation() {
        let point = GeoPoint { latitude: 1.0, longitude: 2.0 };
        assert_eq!(
            UserPosition::from(GeolocationResult::Resolved(point)),
            UserPosition::Resolved(point)
        );
        assert!(!UserPosition::from(GeolocationResult::Denied).is_valid());
        assert!(!UserPosition::from(GeolocationResult::TimedOut).is_valid());
        assert!(!UserPosition::from(GeolocationResult::Unavailable).is_valid());
    }

    #[test]
    fn test_geolocation_result_wire_format() {
        let resolved: GeolocationResult = serde_json::from_value(json!({
            "status": "resolved", "latitude": 3.0, "longitude": 4.0
        }))
        .unwrap();
        assert_eq!(
            resolved,
            GeolocationResult::Resolved(GeoPoint { latitude: 3.0, longitude: 4.0 })
        );

        let timed_out: GeolocationResult =
            serde_json::from_value(json!({ "status": "timed_out" })).unwrap();
        assert_eq!(timed_out, GeolocationResult::TimedOut);
    }
}

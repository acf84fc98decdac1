// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CoordinateError, GeoPoint, GeolocationResult, School, SchoolRecord, SchoolRecordError, UserPosition};
pub use requests::{DistanceQuery, HoverRequest, QueryUpdateRequest, SchoolsQuery, SearchRequest};
pub use responses::{
    DistanceResponse, ErrorResponse, HealthResponse, HoverResponse, PositionResponse, QueryResponse,
    RefreshResponse, SchoolListResponse, SearchResponse,
};

// Service exports
pub mod geolocation;
pub mod school_api;

pub use geolocation::{ConfiguredGeolocator, Geolocation, GeolocationOptions, Geolocator};
pub use school_api::{parse_school_list, SchoolApiClient, SchoolApiError};

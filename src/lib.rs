//! Beacon Directory - school listing service for the Beacon school picker
//!
//! This library holds the directory logic behind the "Pick Your School" page:
//! great-circle distances, the distance- or name-ordered school listing, and
//! name search. The binary wraps it in an HTTP service that fetches the school
//! list upstream and keeps the page state server-side.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance, search, sorted_view, DistanceUnit, PageState, SchoolDirectory, SearchError, Transition};
pub use crate::models::{GeoPoint, GeolocationResult, School, UserPosition};

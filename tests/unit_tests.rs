// Unit tests for Beacon Directory

use beacon_directory::core::{distance, search, sorted_view, DistanceUnit, SearchError};
use beacon_directory::models::{GeoPoint, School, UserPosition};

fn point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint { latitude, longitude }
}

fn school(id: &str, name: &str, location: GeoPoint) -> School {
    School {
        id: id.to_string(),
        name: name.to_string(),
        location,
        kind: "Public".to_string(),
        highest_degree: "High School Diploma".to_string(),
        county: "Sangamon County".to_string(),
        state: Some("IL".to_string()),
    }
}

#[test]
fn test_distance_same_point_every_unit() {
    let p = point(39.7817, -89.6501);
    for unit in [DistanceUnit::Kilometers, DistanceUnit::NauticalMiles, DistanceUnit::Miles] {
        assert_eq!(distance(p, p, unit), 0.0);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [
        (point(51.5074, -0.1278), point(48.8566, 2.3522)),
        (point(-33.8688, 151.2093), point(35.6762, 139.6503)),
        (point(0.0, 0.0), point(0.0, 180.0)),
        (point(89.9, 10.0), point(-89.9, -170.0)),
    ];

    for (a, b) in pairs {
        for unit in [DistanceUnit::Kilometers, DistanceUnit::NauticalMiles, DistanceUnit::Miles] {
            let ab = distance(a, b, unit);
            let ba = distance(b, a, unit);
            assert!((ab - ba).abs() < 1e-9, "{:?} vs {:?}: {} != {}", a, b, ab, ba);
        }
    }
}

#[test]
fn test_distance_never_nan_for_valid_coordinates() {
    let mut lat = -90.0;
    while lat <= 90.0 {
        let mut lng = -180.0;
        while lng <= 180.0 {
            let d = distance(point(0.0, 0.0), point(lat, lng), DistanceUnit::Kilometers);
            assert!(d.is_finite() && d >= 0.0, "bad distance {} for ({}, {})", d, lat, lng);
            lng += 15.0;
        }
        lat += 15.0;
    }
}

#[test]
fn test_one_degree_longitude_at_equator() {
    let d = distance(point(0.0, 0.0), point(0.0, 1.0), DistanceUnit::Kilometers);
    assert!((d - 111.2).abs() < 0.1, "Expected ~111.2km, got {}", d);
}

#[test]
fn test_sorted_view_by_name_is_case_insensitive() {
    let schools = vec![
        school("1", "lincoln Elementary", point(0.0, 0.0)),
        school("2", "Douglas High", point(0.0, 0.0)),
        school("3", "adams Middle", point(0.0, 0.0)),
        school("4", "Zachary Prep", point(0.0, 0.0)),
    ];

    let names: Vec<&str> = sorted_view(&schools, &UserPosition::Unresolved)
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    assert_eq!(names, vec!["adams Middle", "Douglas High", "lincoln Elementary", "Zachary Prep"]);
}

#[test]
fn test_sorted_view_by_distance() {
    let springfield = point(39.7817, -89.6501);
    let schools = vec![
        school("chicago", "Chicago School", point(41.8781, -87.6298)),
        school("peoria", "Peoria School", point(40.6936, -89.5890)),
        school("local", "Springfield School", point(39.80, -89.64)),
    ];

    let ids: Vec<&str> = sorted_view(&schools, &UserPosition::Resolved(springfield))
        .iter()
        .map(|s| s.id.as_str())
        .collect();

    assert_eq!(ids, vec!["local", "peoria", "chicago"]);
}

#[test]
fn test_sorted_view_does_not_mutate_input() {
    let schools = vec![
        school("b", "Beta", point(0.0, 2.0)),
        school("a", "Alpha", point(0.0, 1.0)),
    ];
    let before = schools.clone();

    let _ = sorted_view(&schools, &UserPosition::Resolved(point(0.0, 0.0)));
    let _ = sorted_view(&schools, &UserPosition::Unresolved);

    assert_eq!(schools, before);
}

#[test]
fn test_search_three_chars_is_too_short() {
    let schools = vec![school("1", "Abc Academy", point(0.0, 0.0))];
    assert!(matches!(search("abc", &schools), Err(SearchError::QueryTooShort { .. })));
}

#[test]
fn test_search_short_query_rejected_even_without_match() {
    let schools = vec![school("1", "Springfield High", point(0.0, 0.0))];
    assert!(matches!(search("zz", &schools), Err(SearchError::QueryTooShort { .. })));
}

#[test]
fn test_search_first_match_wins() {
    let schools = vec![
        school("1", "Springfield High", point(0.0, 0.0)),
        school("2", "Springfield Elementary", point(0.0, 0.0)),
    ];

    let found = search("springfield high", &schools).unwrap();
    assert_eq!(found.name, "Springfield High");

    let found = search("SPRING", &schools).unwrap();
    assert_eq!(found.id, "1");
}

#[test]
fn test_search_not_found() {
    let schools = vec![school("1", "Springfield High", point(0.0, 0.0))];
    assert_eq!(
        search("zzz-nonexistent", &schools),
        Err(SearchError::NotFound("zzz-nonexistent".to_string()))
    );
}

use crate::core::distance::distance_km;
use crate::models::{School, UserPosition};
use serde::Serialize;

/// A school as shown in the list, with its tooltip text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolCard {
    #[serde(flatten)]
    pub school: School,
    /// County without the trailing "County" word
    #[serde(rename = "countyLabel")]
    pub county_label: String,
    pub initial: Option<char>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    pub tooltip: Vec<String>,
}

impl SchoolCard {
    pub fn describe(school: &School, position: &UserPosition) -> Self {
        let distance_km = position.point().map(|origin| distance_km(origin, school.location));

        Self {
            school: school.clone(),
            county_label: county_label(&school.county),
            initial: school.name.chars().next(),
            distance_km,
            tooltip: tooltip_lines(school, distance_km),
        }
    }
}

/// County name with the first "County" removed
pub fn county_label(county: &str) -> String {
    county.replacen("County", "", 1).trim().to_string()
}

fn tooltip_lines(school: &School, distance_km: Option<f64>) -> Vec<String> {
    let distance_line = match distance_km {
        Some(km) => format!("This school is {:.2}km away from you", km),
        None => format!("Enable location to see how far away {} is from you", school.name),
    };

    vec![
        format!("This is a {} school", school.kind.to_lowercase()),
        format!("This school is found in {}", school.county),
        format!("Highest attainable degree here is a {}", school.highest_degree),
        distance_line,
    ]
}

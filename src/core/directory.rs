use crate::core::collation::compare_names;
use crate::core::distance::distance_km;
use crate::models::{School, UserPosition};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Queries shorter than this are rejected before searching
pub const DEFAULT_MIN_QUERY_LEN: usize = 4;

/// Why a search did not resolve to a school
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("query '{query}' is shorter than {min_len} characters")]
    QueryTooShort { query: String, min_len: usize },

    #[error("no school matches '{0}'")]
    NotFound(String),
}

/// Result of resolving a query against the directory
pub type SearchResult<'a> = Result<&'a School, SearchError>;

/// How a sorted view was ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Distance,
    Name,
}

impl SortOrder {
    pub fn for_position(position: &UserPosition) -> Self {
        if position.is_valid() {
            SortOrder::Distance
        } else {
            SortOrder::Name
        }
    }
}

/// Order schools for display without touching the input
///
/// With a resolved position the order is ascending distance in kilometres;
/// otherwise it is ascending by display name. Both sorts are stable, so
/// equal keys keep their original relative order.
pub fn sorted_view<'a>(schools: &'a [School], position: &UserPosition) -> Vec<&'a School> {
    match position.point() {
        Some(origin) => {
            let mut ranked: Vec<(f64, &School)> = schools
                .iter()
                .map(|school| (distance_km(origin, school.location), school))
                .collect();

            ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            ranked.into_iter().map(|(_, school)| school).collect()
        }
        None => {
            let mut view: Vec<&School> = schools.iter().collect();
            view.sort_by(|a, b| compare_names(&a.name, &b.name));
            view
        }
    }
}

/// Resolve a query to the first school whose name contains it, ignoring case
pub fn search<'a>(query: &str, schools: &'a [School]) -> SearchResult<'a> {
    check_query_length(query, DEFAULT_MIN_QUERY_LEN)?;

    let needle = query.to_lowercase();
    schools
        .iter()
        .find(|school| school.name.to_lowercase().contains(&needle))
        .ok_or_else(|| SearchError::NotFound(query.to_string()))
}

fn check_query_length(query: &str, min_len: usize) -> Result<(), SearchError> {
    if query.chars().count() < min_len {
        return Err(SearchError::QueryTooShort {
            query: query.to_string(),
            min_len,
        });
    }
    Ok(())
}

/// An immutable school list with lookup indexes
///
/// Schools are keyed by their id. The name index keeps lowercased names in
/// list order so search returns the first occurring match.
#[derive(Debug, Clone)]
pub struct SchoolDirectory {
    schools: Vec<School>,
    by_id: HashMap<String, usize>,
    name_index: Vec<(String, usize)>,
    min_query_len: usize,
}

impl SchoolDirectory {
    pub fn new(schools: Vec<School>) -> Self {
        Self::with_min_query_len(schools, DEFAULT_MIN_QUERY_LEN)
    }

    pub fn with_min_query_len(schools: Vec<School>, min_query_len: usize) -> Self {
        let mut by_id = HashMap::with_capacity(schools.len());
        let mut name_index = Vec::with_capacity(schools.len());

        for (position, school) in schools.iter().enumerate() {
            if by_id.contains_key(&school.id) {
                tracing::warn!("Duplicate school id {}, keeping first occurrence", school.id);
            } else {
                by_id.insert(school.id.clone(), position);
            }
            name_index.push((school.name.to_lowercase(), position));
        }

        Self {
            schools,
            by_id,
            name_index,
            min_query_len,
        }
    }

    /// Same settings, new list
    pub fn replace(&self, schools: Vec<School>) -> Self {
        Self::with_min_query_len(schools, self.min_query_len)
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    pub fn get(&self, id: &str) -> Option<&School> {
        self.by_id.get(id).and_then(|&i| self.schools.get(i))
    }

    pub fn sorted_view(&self, position: &UserPosition) -> Vec<&School> {
        sorted_view(&self.schools, position)
    }

    pub fn search(&self, query: &str) -> SearchResult<'_> {
        check_query_length(query, self.min_query_len)?;

        let needle = query.to_lowercase();
        self.name_index
            .iter()
            .find(|(name, _)| name.contains(&needle))
            .and_then(|&(_, i)| self.schools.get(i))
            .ok_or_else(|| SearchError::NotFound(query.to_string()))
    }
}

impl Default for SchoolDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

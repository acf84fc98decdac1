use crate::core::directory::{SchoolDirectory, SearchError};
use crate::models::{GeolocationResult, School, UserPosition};
use std::sync::Arc;

/// Everything the directory page knows at one point in time
///
/// The record is never mutated in place. Each input (a fetched list, a
/// geolocation outcome, a typed query, a hover) is a [`Transition`] that
/// produces the next state, so the fetch and the geolocation lookup can
/// settle in either order.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    directory: Arc<SchoolDirectory>,
    position: UserPosition,
    last_geolocation: Option<GeolocationResult>,
    query: String,
    hovered: Option<String>,
}

/// An input that moves the page to its next state
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A freshly fetched list, replacing the previous one wholesale
    SchoolsLoaded(Vec<School>),
    PositionSettled(GeolocationResult),
    QueryEdited(String),
    QueryCleared,
    /// `None` when the pointer leaves a school
    HoverChanged(Option<String>),
}

impl PageState {
    pub fn new(directory: SchoolDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
            ..Self::default()
        }
    }

    pub fn apply(self, transition: Transition) -> Self {
        match transition {
            Transition::SchoolsLoaded(schools) => {
                let directory = Arc::new(self.directory.replace(schools));
                // a hover on a school that vanished from the list is dropped
                let hovered = self.hovered.filter(|id| directory.get(id).is_some());
                Self {
                    directory,
                    hovered,
                    ..self
                }
            }
            Transition::PositionSettled(result) => Self {
                position: UserPosition::from(result),
                last_geolocation: Some(result),
                ..self
            },
            Transition::QueryEdited(query) => Self { query, ..self },
            Transition::QueryCleared => Self {
                query: String::new(),
                ..self
            },
            Transition::HoverChanged(hovered) => Self { hovered, ..self },
        }
    }

    /// Run a search for `query`, or the stored query when `None`, and clear
    /// the stored query whatever the outcome
    pub fn submit_search(self, query: Option<String>) -> (Self, Result<School, SearchError>) {
        let query = query.unwrap_or_else(|| self.query.clone());
        let outcome = self.directory.search(&query).cloned();
        (self.apply(Transition::QueryCleared), outcome)
    }

    pub fn directory(&self) -> &SchoolDirectory {
        &self.directory
    }

    pub fn position(&self) -> &UserPosition {
        &self.position
    }

    pub fn last_geolocation(&self) -> Option<GeolocationResult> {
        self.last_geolocation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn hovered(&self) -> Option<&School> {
        self.hovered.as_deref().and_then(|id| self.directory.get(id))
    }

    /// Current sorted view given the stored position
    pub fn sorted_view(&self) -> Vec<&School> {
        self.directory.sorted_view(&self.position)
    }
}

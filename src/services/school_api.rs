use crate::models::{School, SchoolRecord};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching the school list
#[derive(Debug, Error)]
pub enum SchoolApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the upstream schools API
///
/// The whole list is fetched in one request and handed back for the caller
/// to swap in; nothing is merged or cached here.
#[derive(Debug, Clone)]
pub struct SchoolApiClient {
    url: String,
    client: Client,
}

impl SchoolApiClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SchoolApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every school
    ///
    /// Records that cannot be turned into a [`School`] are skipped and logged.
    pub async fn fetch_schools(&self) -> Result<Vec<School>, SchoolApiError> {
        tracing::debug!("Fetching schools from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(SchoolApiError::ApiError(format!(
                "Failed to fetch schools: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let schools = parse_school_list(json)?;

        tracing::debug!("Fetched {} schools", schools.len());

        Ok(schools)
    }
}

/// Accepts either a bare array or `{ "schools": [...] }`
pub fn parse_school_list(json: Value) -> Result<Vec<School>, SchoolApiError> {
    let records = match json {
        Value::Array(records) => records,
        Value::Object(mut body) => match body.remove("schools") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(SchoolApiError::InvalidResponse(
                    "Missing schools array".into(),
                ))
            }
        },
        other => {
            return Err(SchoolApiError::InvalidResponse(format!(
                "Expected array or object, got {}",
                other
            )))
        }
    };

    let total = records.len();
    let schools: Vec<School> = records
        .into_iter()
        .filter_map(|record| {
            let parsed = serde_json::from_value::<SchoolRecord>(record)
                .map_err(|e| e.to_string())
                .and_then(|record| School::try_from(record).map_err(|e| e.to_string()));
            match parsed {
                Ok(school) => Some(school),
                Err(e) => {
                    tracing::warn!("Skipping school record: {}", e);
                    None
                }
            }
        })
        .collect();

    if schools.len() < total {
        tracing::warn!("Kept {} of {} school records", schools.len(), total);
    }

    Ok(schools)
}

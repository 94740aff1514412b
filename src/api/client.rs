//! HTTP client for the Oyez `cases` endpoint.

use super::types::RawCase;
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::ApiError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Source of raw case records, one batch per term filter value
pub trait CaseSource {
    fn fetch_term(&self, term: &str) -> Result<Vec<RawCase>, ApiError>;
}

/// Blocking client for the Oyez API
pub struct OyezClient {
    client: Client,
    base_url: String,
}

impl OyezClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// URL for a single term (or year) filter value
    pub fn term_url(&self, term: &str) -> String {
        build_term_url(&self.base_url, term)
    }
}

impl CaseSource for OyezClient {
    fn fetch_term(&self, term: &str) -> Result<Vec<RawCase>, ApiError> {
        let url = self.term_url(term);
        info!("Fetching cases for term {}", term);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        info!("{}: status code: {}", term, status.as_u16());

        if !status.is_success() {
            return Err(ApiError::InvalidResponse {
                term: term.to_string(),
                reason: format!("HTTP {}: {}", status, response.text().unwrap_or_default()),
            });
        }

        let value: serde_json::Value = response.json().map_err(ApiError::RequestFailed)?;
        parse_case_array(term, value)
    }
}

/// Decode the top-level JSON array of cases
pub fn parse_case_array(term: &str, value: serde_json::Value) -> Result<Vec<RawCase>, ApiError> {
    if !value.is_array() {
        return Err(ApiError::InvalidResponse {
            term: term.to_string(),
            reason: "expected a top-level array of cases".to_string(),
        });
    }

    let cases: Vec<RawCase> =
        serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
            term: term.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Term {} returned {} cases", term, cases.len());
    Ok(cases)
}

fn build_term_url(base_url: &str, term: &str) -> String {
    format!("{}{}", base_url, term.trim())
}

//! HTTP client for fetching event records from an export endpoint.

use super::{EventSource, RawEventData, TimeRange};
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::SourceError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

/// Source that GETs a JSON record list over HTTP
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a new HTTP source with the default timeout
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source with custom timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::RequestFailed)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl EventSource for HttpSource {
    fn describe(&self) -> String {
        format!("endpoint {}", self.url)
    }

    fn fetch(&self, range: &TimeRange) -> Result<RawEventData, SourceError> {
        info!("Fetching events from: {}", self.url);

        let query = range_query(range);
        debug!("Query parameters: {:?}", query);

        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .map_err(SourceError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(SourceError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        response.json().map_err(SourceError::RequestFailed)
    }
}

/// Build `from`/`to` query parameters for a time range
fn range_query(range: &TimeRange) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(from) = range.from {
        query.push(("from", from.to_rfc3339()));
    }
    if let Some(to) = range.to {
        query.push(("to", to.to_rfc3339()));
    }
    query
}

//! HTTP source provider.
//!
//! One blocking GET per source. The body must decode to a JSON array. There is
//! no retry: a failed request is reported as-is and ends the run.

use super::provider::{expect_array, FetchError, SourceProvider};
use crate::config::SourceLocations;
use crate::domain::SourceId;
use serde_json::Value;
use tracing::debug;

/// Fetches each source's raw array from its configured URL.
pub struct HttpProvider {
    client: reqwest::blocking::Client,
    locations: SourceLocations,
}

impl HttpProvider {
    pub fn new(locations: SourceLocations) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("catseries/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FetchError::NetworkUnreachable(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, locations })
    }
}

impl SourceProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, source: SourceId) -> Result<Vec<Value>, FetchError> {
        let url = self.locations.get(source);
        debug!(%source, url, "fetching source");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::NetworkUnreachable(format!("{url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                location: url.to_string(),
            });
        }

        let doc: Value = resp.json().map_err(|e| {
            FetchError::ResponseFormat(format!("failed to parse response from {url}: {e}"))
        })?;

        expect_array(url, doc)
    }
}

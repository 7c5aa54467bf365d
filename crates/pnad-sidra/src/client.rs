//! Blocking HTTP client for the SIDRA values API.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info};

use pnad_model::RawRecord;

use crate::error::{Result, SidraError};
use crate::query::SidraQuery;
use crate::rows::parse_rows;

/// SIDRA values API base URL.
pub const SIDRA_API_URL: &str = "https://apisidra.ibge.gov.br/values";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can answer a [`SidraQuery`] with raw records.
pub trait DataSource {
    fn fetch(&self, query: &SidraQuery) -> Result<Vec<RawRecord>>;
}

/// Client for the IBGE SIDRA values API.
pub struct SidraClient {
    client: Client,
    base_url: String,
}

impl SidraClient {
    /// Create a client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(SIDRA_API_URL)
    }

    /// Create a client against another deployment of the API.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SidraError::Network {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    /// Full request URL for a query.
    pub fn url(&self, query: &SidraQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }
}

impl DataSource for SidraClient {
    fn fetch(&self, query: &SidraQuery) -> Result<Vec<RawRecord>> {
        let url = self.url(query);
        let start = Instant::now();
        debug!(url = %url, "fetching SIDRA table");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, concat!("pnad/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| SidraError::Network {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SidraError::Status {
                url,
                status,
                message: message.trim().to_string(),
            });
        }

        let text = response.text().map_err(|source| SidraError::Network {
            url: url.clone(),
            source,
        })?;
        let records = parse_rows(query, &decode_body(&text)?)?;

        info!(
            table = %query.table,
            rows = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "SIDRA fetch complete"
        );
        Ok(records)
    }
}

/// A body that arrived but is not JSON is a payload problem, not a
/// network one.
fn decode_body(text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).map_err(|err| {
        let head: String = text.trim().chars().take(80).collect();
        SidraError::Payload(format!("response is not JSON ({err}): {head}"))
    })
}

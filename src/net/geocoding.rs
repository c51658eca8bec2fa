//! Geocoding search client — free-text city lookup for the birth-place step.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::NetworkError;

/// A single geocoding candidate returned by the search endpoint.
///
/// Coordinates arrive as decimal strings on the wire; use [`coordinates`]
/// to parse them. Identity is `place_id`.
///
/// [`coordinates`]: SearchLocation::coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub place_id: i64,
    pub display_name: String,
    /// Short name of the place (e.g. just the city).
    #[serde(default)]
    pub name: String,
    pub lat: String,
    pub lon: String,
    /// Place type reported by the endpoint, e.g. "city" or "village".
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Ranking score; higher means a better match.
    #[serde(default)]
    pub importance: f64,
}

impl SearchLocation {
    /// Parse the latitude/longitude strings into numbers.
    ///
    /// Fails with a decoding error when the endpoint returned something that
    /// is not a decimal coordinate — callers treat this as a local validation
    /// failure, never a reason to retry the network.
    pub fn coordinates(&self) -> Result<(f64, f64), NetworkError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| NetworkError::Decoding(format!("invalid latitude: {:?}", self.lat)))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| NetworkError::Decoding(format!("invalid longitude: {:?}", self.lon)))?;
        Ok((lat, lon))
    }
}

/// Remote geocoding lookup. Pure request/response — no state beyond the
/// HTTP connection pool.
#[async_trait]
pub trait LocationSearchClient: Send + Sync {
    /// Search for locations matching a free-text city query.
    ///
    /// An empty or whitespace-only query returns an empty list without a
    /// request. Results are sorted by descending importance.
    async fn search(&self, query: &str) -> Result<Vec<SearchLocation>, NetworkError>;
}

/// HTTP implementation backed by a public geocoding endpoint.
pub struct HttpLocationSearchClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    limit: u32,
}

impl HttpLocationSearchClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.geocoding_url.clone(),
            user_agent: config.user_agent.clone(),
            limit: config.search_limit,
        }
    }
}

#[async_trait]
impl LocationSearchClient for HttpLocationSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchLocation>, NetworkError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.limit.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("city", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(NetworkError::from_transport)?;

        if let Some(err) = super::error_for_status(resp.status()) {
            return Err(err);
        }

        let body = resp
            .text()
            .await
            .map_err(|_| NetworkError::InvalidResponse)?;
        let mut locations = parse_search_response(&body)?;
        sort_by_importance(&mut locations);
        Ok(locations)
    }
}

/// Decode the response body into location candidates.
fn parse_search_response(body: &str) -> Result<Vec<SearchLocation>, NetworkError> {
    serde_json::from_str(body).map_err(|e| NetworkError::Decoding(e.to_string()))
}

/// Sort candidates so the best matches come first.
fn sort_by_importance(locations: &mut [SearchLocation]) {
    locations.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

//! Configuration types.

use std::time::Duration;

/// App core configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the personalization API.
    pub api_base_url: String,
    /// Geocoding search endpoint.
    pub geocoding_url: String,
    /// User-Agent header sent with geocoding requests (the endpoint requires
    /// a distinct client identifier).
    pub user_agent: String,
    /// Quiet window before a typed query is dispatched as a search.
    pub search_debounce: Duration,
    /// Queries shorter than this are never dispatched.
    pub min_query_len: usize,
    /// Maximum number of geocoding candidates to request.
    pub search_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.cometta.app".to_string(),
            geocoding_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "ComettaApp/1.0".to_string(),
            search_debounce: Duration::from_millis(500),
            min_query_len: 2,
            search_limit: 10,
        }
    }
}

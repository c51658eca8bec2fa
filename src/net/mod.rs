//! Remote API clients — geocoding search and personalization submission.

pub mod geocoding;
pub mod personalization;

pub use geocoding::{HttpLocationSearchClient, LocationSearchClient, SearchLocation};
pub use personalization::{
    HttpPersonalizationClient, PersonalizationClient, PersonalizationRequest,
};

use reqwest::StatusCode;

use crate::error::NetworkError;

/// Map a non-success HTTP status into the error taxonomy.
///
/// Returns `None` for 2xx statuses.
pub(crate) fn error_for_status(status: StatusCode) -> Option<NetworkError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED => NetworkError::Unauthorized,
        StatusCode::FORBIDDEN => NetworkError::Forbidden,
        StatusCode::NOT_FOUND => NetworkError::NotFound,
        other => NetworkError::Server(other.as_u16()),
    })
}

//! Error types for cometta-core.

/// Top-level error type for the app core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures from the remote API clients.
///
/// Each variant's `Display` string is user-displayable; the onboarding
/// machine surfaces it verbatim as the inline submission error.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Access forbidden")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error with status code: {0}")]
    Server(u16),

    #[error("Failed to decode response: {0}")]
    Decoding(String),

    /// Local validation failure caught before any request is made. Carries
    /// the user-facing message directly.
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unknown error occurred")]
    Unknown,
}

impl NetworkError {
    /// Map a reqwest failure into the taxonomy.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decoding(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Local persistence failures.
///
/// A missing record is not an error — `UserStore::load` returns `Ok(None)`
/// on a cold start. These variants cover genuine faults only.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialization(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Result type alias for the app core.
pub type Result<T> = std::result::Result<T, Error>;

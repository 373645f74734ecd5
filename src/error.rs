//! Paimon error types

/// Crate-wide error for configuration, asset and I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum PaimonError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for PaimonError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PaimonError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => PaimonError::Http(err.to_string()),
        }
    }
}

/// Outcome taxonomy of a failed player fetch.
///
/// Kept separate from [`PaimonError`] because the request handler maps each
/// variant to a distinct HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The upstream has no public data for this identifier.
    #[error("player not found or no public data available")]
    NotFound,

    /// Transport failure, upstream error status, or failed bootstrap.
    #[error("upstream error: {message}")]
    Upstream {
        /// Upstream HTTP status, when one was received.
        status: Option<u16>,
        message: String,
    },
}

impl FetchError {
    /// Status to report to callers; unknown upstream statuses become 500.
    pub fn status(&self) -> u16 {
        match self {
            FetchError::NotFound => 404,
            FetchError::Upstream { status, .. } => status.unwrap_or(500),
        }
    }

    pub(crate) fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        FetchError::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl From<PaimonError> for FetchError {
    fn from(err: PaimonError) -> Self {
        match err {
            PaimonError::Api { status, message } => FetchError::upstream(Some(status), message),
            other => FetchError::upstream(None, other.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::upstream(Some(504), err.to_string());
        }
        match err.status() {
            Some(status) if status.as_u16() == 404 => FetchError::NotFound,
            status => FetchError::upstream(status.map(|s| s.as_u16()), err.to_string()),
        }
    }
}

/// Failure of a cache back-end. Never fatal to a request.
#[derive(Debug, thiserror::Error)]
#[error("cache backend error: {0}")]
pub struct CacheError(pub String);

/// Result type alias for paimon operations
pub type Result<T> = std::result::Result<T, PaimonError>;

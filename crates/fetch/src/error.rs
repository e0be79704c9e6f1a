use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}")]
    Http(u16),

    #[error("Response body was empty")]
    EmptyBody,
}

impl FetchError {
    /// Network failures, 5xx responses and rate limiting are worth retrying.
    /// Everything else will fail the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http(status) => *status >= 500 || *status == 429,
            Self::Client(_) | Self::EmptyBody => false,
        }
    }
}

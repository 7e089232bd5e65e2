use std::time::Duration;

use thiserror::Error;

/// Anything that goes wrong once a classification request has been dispatched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("classification request timed out after {0:?}")]
    Timeout(Duration),
    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid classification endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

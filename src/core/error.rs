use crate::core::models::Provider;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    Status { status: u16, body: Value },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            RequestError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The provider's own error object, when the response body wraps one
    /// under an `error` key.
    pub fn api_error(&self) -> Option<&Value> {
        self.body().and_then(|body| body.get("error"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{provider}: No {field} provided")]
    MissingField {
        provider: Provider,
        field: &'static str,
    },

    #[error("{provider}: invalid base URL {url:?}")]
    InvalidBaseUrl { provider: Provider, url: String },

    #[error("{provider}: {field} is not a valid header value")]
    InvalidHeader {
        provider: Provider,
        field: &'static str,
    },

    #[error("{0} does not support streaming")]
    StreamUnsupported(Provider),
}

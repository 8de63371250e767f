//! Elemental client error types.

use thiserror::Error;
use vtapi_provider::ProviderError;

use crate::types::ErrorDocument;
use crate::NAME;

pub type ElementalResult<T> = Result<T, ElementalError>;

#[derive(Debug, Error)]
pub enum ElementalError {
    #[error("Elemental Conductor returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("XML encode error: {0}")]
    Encode(#[from] quick_xml::se::SeError),

    #[error("XML decode error: {0}")]
    Decode(#[from] quick_xml::de::DeError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid resource id {0:?}")]
    InvalidId(String),
}

impl ElementalError {
    /// Build an API error from a non-2xx response, keeping the backend's
    /// messages when the body is an error document.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = quick_xml::de::from_str::<ErrorDocument>(body)
            .ok()
            .map(|doc| {
                doc.errors
                    .iter()
                    .map(|e| e.trim())
                    .filter(|e| !e.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());

        Self::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ElementalError::Api { status, .. } => Some(*status),
            ElementalError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ElementalError> for ProviderError {
    fn from(err: ElementalError) -> Self {
        let status = err.status();
        let message = match err {
            ElementalError::Api { message, .. } => message,
            other => other.to_string(),
        };
        ProviderError::backend_request(NAME, status, message)
    }
}

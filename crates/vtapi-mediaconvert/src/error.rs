//! MediaConvert client error types.

use thiserror::Error;
use vtapi_provider::ProviderError;

use crate::NAME;

pub type MediaConvertResult<T> = Result<T, MediaConvertApiError>;

#[derive(Debug, Error)]
pub enum MediaConvertApiError {
    #[error("MediaConvert {operation} failed: {message}")]
    Api {
        operation: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response from {operation}: {message}")]
    InvalidResponse { operation: &'static str, message: String },
}

impl MediaConvertApiError {
    pub fn api(operation: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            MediaConvertApiError::Api { status, .. } => *status,
            MediaConvertApiError::InvalidResponse { .. } => None,
        }
    }
}

impl From<MediaConvertApiError> for ProviderError {
    fn from(err: MediaConvertApiError) -> Self {
        let status = err.status();
        let message = match err {
            MediaConvertApiError::Api { message, .. } => message,
            other => other.to_string(),
        };
        ProviderError::backend_request(NAME, status, message)
    }
}

//! Provider error types.

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the registry and by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    #[error("Provider registry already installed")]
    RegistryAlreadyInstalled,

    #[error("Invalid {provider} configuration: {message}")]
    InvalidConfiguration { provider: String, message: String },

    #[error("Invalid preset for {provider}: {message}")]
    InvalidPreset { provider: String, message: String },

    #[error("{provider} request failed{}: {message}", status_suffix(.status))]
    BackendRequest {
        provider: String,
        status: Option<u16>,
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl ProviderError {
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider(name.into())
    }

    pub fn invalid_configuration(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn invalid_preset(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPreset {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn backend_request(provider: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::BackendRequest {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Check if the error was raised while validating configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ProviderError::InvalidConfiguration { .. })
    }

    /// Check if the backend reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::BackendRequest { status: Some(404), .. })
    }

    /// HTTP status reported by the backend, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ProviderError::BackendRequest { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_request_display_keeps_backend_text() {
        let err = ProviderError::backend_request("elementalconductor", Some(422), "Preset 'x' not found");
        assert_eq!(
            err.to_string(),
            "elementalconductor request failed (422): Preset 'x' not found"
        );

        let err = ProviderError::backend_request("mediaconvert", None, "connection reset");
        assert_eq!(err.to_string(), "mediaconvert request failed: connection reset");
    }

    #[test]
    fn test_predicates() {
        assert!(ProviderError::invalid_configuration("x", "missing host").is_configuration_error());
        assert!(ProviderError::backend_request("x", Some(404), "gone").is_not_found());
        assert!(!ProviderError::backend_request("x", Some(500), "boom").is_not_found());
        assert_eq!(ProviderError::unknown_provider("y").http_status(), None);
    }
}

//! Provider configuration.
//!
//! One section per backend, loaded from environment variables. Loading never
//! fails: missing values are left empty and rejected by `validate()` when the
//! provider factory runs, before any client is built.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Default AWS region for MediaConvert.
pub const DEFAULT_MEDIACONVERT_REGION: &str = "us-east-1";

/// Default transport timeout for the Elemental Conductor client.
pub const DEFAULT_ELEMENTAL_TIMEOUT_SECS: u64 = 30;

/// Configuration for every supported provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub elemental_conductor: ElementalConductorConfig,
    pub media_convert: MediaConvertConfig,
}

impl ProviderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            elemental_conductor: ElementalConductorConfig::from_env(),
            media_convert: MediaConvertConfig::from_env(),
        }
    }
}

/// Elemental Conductor settings.
#[derive(Clone)]
pub struct ElementalConductorConfig {
    /// Conductor base URL (e.g. "https://conductor.example.com")
    pub host: String,
    /// API user login
    pub user_login: String,
    /// API key used to sign requests
    pub api_key: String,
    /// Lifetime of a request signature, in seconds
    pub auth_expires: u64,
    /// Access key attached to input and output locations
    pub access_key_id: String,
    /// Secret key attached to input and output locations
    pub secret_access_key: String,
    /// Destination root for outputs (e.g. "s3://bucket/out/")
    pub destination: String,
    /// Transport timeout
    pub timeout: Duration,
}

impl Default for ElementalConductorConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            user_login: String::new(),
            api_key: String::new(),
            auth_expires: 0,
            access_key_id: String::new(),
            secret_access_key: String::new(),
            destination: String::new(),
            timeout: Duration::from_secs(DEFAULT_ELEMENTAL_TIMEOUT_SECS),
        }
    }
}

impl ElementalConductorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env_string("ELEMENTALCONDUCTOR_HOST"),
            user_login: env_string("ELEMENTALCONDUCTOR_USER_LOGIN"),
            api_key: env_string("ELEMENTALCONDUCTOR_API_KEY"),
            auth_expires: std::env::var("ELEMENTALCONDUCTOR_AUTH_EXPIRES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            access_key_id: env_string("ELEMENTALCONDUCTOR_AWS_ACCESS_KEY_ID"),
            secret_access_key: env_string("ELEMENTALCONDUCTOR_AWS_SECRET_ACCESS_KEY"),
            destination: env_string("ELEMENTALCONDUCTOR_DESTINATION"),
            timeout: Duration::from_secs(
                std::env::var("ELEMENTALCONDUCTOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_ELEMENTAL_TIMEOUT_SECS),
            ),
        }
    }

    /// Reject missing or malformed required settings.
    pub fn validate(&self, provider: &str) -> ProviderResult<()> {
        let missing = |field: &str| {
            ProviderError::invalid_configuration(
                provider,
                format!(
                    "{} is required; set ELEMENTALCONDUCTOR_{} or define it in the configuration",
                    field,
                    field.to_ascii_uppercase()
                ),
            )
        };

        if self.host.trim().is_empty() {
            return Err(missing("host"));
        }
        validate_http_url(provider, "host", &self.host)?;
        if self.user_login.trim().is_empty() {
            return Err(missing("user_login"));
        }
        if self.api_key.trim().is_empty() {
            return Err(missing("api_key"));
        }
        if self.auth_expires == 0 {
            return Err(ProviderError::invalid_configuration(
                provider,
                "auth_expires must be greater than zero",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ProviderError::invalid_configuration(
                provider,
                "timeout must be greater than zero; set ELEMENTALCONDUCTOR_TIMEOUT_SECS or leave it unset",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ElementalConductorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementalConductorConfig")
            .field("host", &self.host)
            .field("user_login", &self.user_login)
            .field("api_key", &redact(&self.api_key))
            .field("auth_expires", &self.auth_expires)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("destination", &self.destination)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// AWS Elemental MediaConvert settings.
#[derive(Clone, Default)]
pub struct MediaConvertConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// AWS region; defaults to us-east-1 when empty
    pub region: String,
    /// Account-specific MediaConvert endpoint
    pub endpoint: String,
    /// Queue ARN; the account default queue is used when empty
    pub queue_arn: String,
    /// IAM role assumed by MediaConvert to read inputs and write outputs
    pub role_arn: String,
    /// Destination root for outputs (e.g. "s3://bucket/out/")
    pub destination: String,
}

impl MediaConvertConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            access_key_id: env_string("MEDIACONVERT_AWS_ACCESS_KEY_ID"),
            secret_access_key: env_string("MEDIACONVERT_AWS_SECRET_ACCESS_KEY"),
            region: env_string("MEDIACONVERT_AWS_REGION"),
            endpoint: env_string("MEDIACONVERT_ENDPOINT"),
            queue_arn: env_string("MEDIACONVERT_QUEUE_ARN"),
            role_arn: env_string("MEDIACONVERT_ROLE_ARN"),
            destination: env_string("MEDIACONVERT_DESTINATION"),
        }
    }

    /// Region to use, applying the documented default.
    pub fn region_or_default(&self) -> &str {
        if self.region.trim().is_empty() {
            DEFAULT_MEDIACONVERT_REGION
        } else {
            self.region.trim()
        }
    }

    /// Queue ARN, if one is configured.
    pub fn queue(&self) -> Option<&str> {
        Some(self.queue_arn.trim()).filter(|q| !q.is_empty())
    }

    /// Reject missing or malformed required settings.
    pub fn validate(&self, provider: &str) -> ProviderResult<()> {
        let required = [
            ("access_key_id", "MEDIACONVERT_AWS_ACCESS_KEY_ID", &self.access_key_id),
            ("secret_access_key", "MEDIACONVERT_AWS_SECRET_ACCESS_KEY", &self.secret_access_key),
            ("endpoint", "MEDIACONVERT_ENDPOINT", &self.endpoint),
            ("role_arn", "MEDIACONVERT_ROLE_ARN", &self.role_arn),
            ("destination", "MEDIACONVERT_DESTINATION", &self.destination),
        ];

        for (field, var, value) in required {
            if value.trim().is_empty() {
                return Err(ProviderError::invalid_configuration(
                    provider,
                    format!("{} is required; set {} or define it in the configuration", field, var),
                ));
            }
        }

        validate_http_url(provider, "endpoint", &self.endpoint)
    }
}

impl fmt::Debug for MediaConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConvertConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("queue_arn", &self.queue_arn)
            .field("role_arn", &self.role_arn)
            .field("destination", &self.destination)
            .finish()
    }
}

fn env_string(var: &str) -> String {
    std::env::var(var).unwrap_or_default()
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

fn validate_http_url(provider: &str, field: &str, value: &str) -> ProviderResult<()> {
    let parsed = Url::parse(value.trim()).map_err(|e| {
        ProviderError::invalid_configuration(provider, format!("{} {:?} is not a valid URL: {}", field, value, e))
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        _ => Err(ProviderError::invalid_configuration(
            provider,
            format!("{} {:?} must be an http(s) URL with a host", field, value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn elemental() -> ElementalConductorConfig {
        ElementalConductorConfig {
            host: "https://conductor.example.com".into(),
            user_login: "user".into(),
            api_key: "secret-key".into(),
            auth_expires: 30,
            access_key_id: "AKIA".into(),
            secret_access_key: "s3cr3t".into(),
            destination: "s3://bucket/out/".into(),
            timeout: Duration::from_secs(5),
        }
    }

    fn media_convert() -> MediaConvertConfig {
        MediaConvertConfig {
            access_key_id: "AKIA".into(),
            secret_access_key: "s3cr3t".into(),
            region: String::new(),
            endpoint: "https://abcd.mediaconvert.us-east-1.amazonaws.com".into(),
            queue_arn: String::new(),
            role_arn: "arn:aws:iam::123:role/mc".into(),
            destination: "s3://bucket/out/".into(),
        }
    }

    #[test]
    fn test_elemental_valid() {
        assert!(elemental().validate("elementalconductor").is_ok());
    }

    #[test]
    fn test_elemental_rejects_missing_fields() {
        let mut cfg = elemental();
        cfg.host = String::new();
        assert!(cfg.validate("elementalconductor").unwrap_err().is_configuration_error());

        let mut cfg = elemental();
        cfg.user_login = " ".into();
        assert!(cfg.validate("elementalconductor").is_err());

        let mut cfg = elemental();
        cfg.api_key = String::new();
        assert!(cfg.validate("elementalconductor").is_err());

        let mut cfg = elemental();
        cfg.auth_expires = 0;
        let err = cfg.validate("elementalconductor").unwrap_err();
        assert!(err.to_string().contains("auth_expires"));
    }

    #[test]
    fn test_elemental_default_timeout() {
        let cfg = ElementalConductorConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_ELEMENTAL_TIMEOUT_SECS));

        let cfg = ElementalConductorConfig {
            host: "https://conductor.example.com".into(),
            user_login: "user".into(),
            api_key: "secret-key".into(),
            auth_expires: 30,
            ..Default::default()
        };
        assert!(cfg.validate("elementalconductor").is_ok());
    }

    #[test]
    fn test_elemental_rejects_zero_timeout() {
        let mut cfg = elemental();
        cfg.timeout = Duration::ZERO;
        let err = cfg.validate("elementalconductor").unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_elemental_rejects_malformed_host() {
        let mut cfg = elemental();
        cfg.host = "conductor.example.com".into();
        assert!(cfg.validate("elementalconductor").is_err());

        cfg.host = "ftp://conductor.example.com".into();
        assert!(cfg.validate("elementalconductor").is_err());
    }

    #[test]
    fn test_media_convert_defaults_region_only() {
        let cfg = media_convert();
        assert!(cfg.validate("mediaconvert").is_ok());
        assert_eq!(cfg.region_or_default(), DEFAULT_MEDIACONVERT_REGION);
        assert_eq!(cfg.queue(), None);

        let mut cfg = media_convert();
        cfg.access_key_id = String::new();
        let err = cfg.validate("mediaconvert").unwrap_err();
        assert!(err.to_string().contains("MEDIACONVERT_AWS_ACCESS_KEY_ID"));

        let mut cfg = media_convert();
        cfg.role_arn = String::new();
        assert!(cfg.validate("mediaconvert").is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", elemental());
        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));

        let rendered = format!("{:?}", media_convert());
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    #[serial]
    fn test_elemental_from_env() {
        std::env::set_var("ELEMENTALCONDUCTOR_HOST", "https://conductor.local");
        std::env::set_var("ELEMENTALCONDUCTOR_AUTH_EXPIRES", "45");
        std::env::remove_var("ELEMENTALCONDUCTOR_TIMEOUT_SECS");

        let cfg = ElementalConductorConfig::from_env();
        assert_eq!(cfg.host, "https://conductor.local");
        assert_eq!(cfg.auth_expires, 45);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_ELEMENTAL_TIMEOUT_SECS));

        std::env::remove_var("ELEMENTALCONDUCTOR_HOST");
        std::env::remove_var("ELEMENTALCONDUCTOR_AUTH_EXPIRES");
    }

    #[test]
    #[serial]
    fn test_zero_timeout_from_env_fails_validation() {
        std::env::set_var("ELEMENTALCONDUCTOR_HOST", "https://conductor.local");
        std::env::set_var("ELEMENTALCONDUCTOR_USER_LOGIN", "user");
        std::env::set_var("ELEMENTALCONDUCTOR_API_KEY", "secret-key");
        std::env::set_var("ELEMENTALCONDUCTOR_AUTH_EXPIRES", "45");
        std::env::set_var("ELEMENTALCONDUCTOR_TIMEOUT_SECS", "0");

        let cfg = ElementalConductorConfig::from_env();
        assert!(cfg.timeout.is_zero());
        let err = cfg.validate("elementalconductor").unwrap_err();
        assert!(err.is_configuration_error());

        for var in [
            "ELEMENTALCONDUCTOR_HOST",
            "ELEMENTALCONDUCTOR_USER_LOGIN",
            "ELEMENTALCONDUCTOR_API_KEY",
            "ELEMENTALCONDUCTOR_AUTH_EXPIRES",
            "ELEMENTALCONDUCTOR_TIMEOUT_SECS",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_auth_expires_unparseable_is_zero() {
        std::env::set_var("ELEMENTALCONDUCTOR_AUTH_EXPIRES", "soon");
        assert_eq!(ElementalConductorConfig::from_env().auth_expires, 0);
        std::env::remove_var("ELEMENTALCONDUCTOR_AUTH_EXPIRES");
    }
}

//! Transcoding provider abstraction.
//!
//! This crate provides:
//! - The `TranscodingProvider` contract implemented by every backend
//! - The process-wide provider registry
//! - Provider configuration and validation
//! - Status normalization shared by the backends
//! - Output placement rules and backend metrics

pub mod config;
pub mod destination;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod registry;
pub mod status;

pub use config::{ElementalConductorConfig, MediaConvertConfig, ProviderConfig};
pub use destination::output_base_path;
pub use error::{ProviderError, ProviderResult};
pub use provider::TranscodingProvider;
pub use registry::{ProviderFactory, ProviderRegistry};
pub use status::{normalize, NativeStatusReport, StatusTable};

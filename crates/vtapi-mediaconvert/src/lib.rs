//! AWS Elemental MediaConvert transcoding provider.
//!
//! This crate provides:
//! - Job request construction with one output per preset
//! - The `MediaConvertApi` seam and its AWS SDK implementation
//! - Native status mapping and preset conversion
//! - The `mediaconvert` provider and its registry factory

pub mod api;
pub mod builder;
pub mod error;
pub mod presets;
pub mod provider;
pub mod sdk;
pub mod status;

/// Name the provider is registered under.
pub const NAME: &str = "mediaconvert";

pub use api::{JobRequest, JobSnapshot, MediaConvertApi, PresetDefinition};
pub use builder::build_job_request;
pub use error::{MediaConvertApiError, MediaConvertResult};
pub use provider::{factory, MediaConvertProvider};
pub use sdk::SdkMediaConvert;
pub use status::STATUS_TABLE;

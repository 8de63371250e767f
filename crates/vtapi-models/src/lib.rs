//! Canonical data models for the video transcoding API.
//!
//! This crate provides Serde-serializable types for:
//! - Job specifications (source + ordered presets)
//! - Canonical job status and status detail
//! - Preset records
//! - Provider capabilities

pub mod capabilities;
pub mod job;
pub mod job_status;
pub mod preset;

// Re-export common types
pub use capabilities::Capabilities;
pub use job::{JobSpec, ProviderName};
pub use job_status::{JobStatus, Status, StatusDetail};
pub use preset::{AudioPreset, Preset, RateControl, RemotePreset, VideoPreset};

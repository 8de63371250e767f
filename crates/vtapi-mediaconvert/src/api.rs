//! MediaConvert operations used by the provider.
//!
//! The provider talks to MediaConvert through [`MediaConvertApi`] using the
//! plain request and response types below. [`crate::sdk`] implements it over
//! the AWS SDK.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vtapi_models::RateControl;

use crate::error::MediaConvertResult;

/// Job creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub role: String,
    pub queue: Option<String>,
    pub input_file: String,
    /// File group destination. Ends with `/`.
    pub destination: String,
    pub outputs: Vec<OutputRequest>,
}

/// One output of the file group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRequest {
    pub preset: String,
    pub name_modifier: String,
}

/// Job state as reported by `GetJob`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: String,
    pub status: String,
    pub percent_complete: Option<i32>,
    pub submit_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub finish_time: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

/// Output container of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Mp4,
    M3u8,
}

impl Container {
    /// MediaConvert container type value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Container::Mp4 => "MP4",
            Container::M3u8 => "M3U8",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mp4" => Some(Container::Mp4),
            "m3u8" | "hls" => Some(Container::M3u8),
            _ => None,
        }
    }
}

/// H.264/AAC preset as stored on MediaConvert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDefinition {
    pub name: String,
    pub description: String,
    pub container: Container,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub video_bitrate: i32,
    /// Canonical profile name, e.g. `main`.
    pub profile: Option<String>,
    /// Canonical level, e.g. `3.1`.
    pub level: Option<String>,
    pub gop_size: Option<u32>,
    pub interlace_mode: Option<String>,
    pub rate_control: RateControl,
    pub two_pass: bool,
    pub audio_bitrate: i32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaConvertApi: Send + Sync {
    /// Create a job and return its id.
    async fn create_job(&self, request: &JobRequest) -> MediaConvertResult<String>;

    async fn get_job(&self, job_id: &str) -> MediaConvertResult<JobSnapshot>;

    async fn cancel_job(&self, job_id: &str) -> MediaConvertResult<()>;

    /// Create a preset and return the stored name.
    async fn create_preset(&self, preset: &PresetDefinition) -> MediaConvertResult<String>;

    async fn get_preset(&self, name: &str) -> MediaConvertResult<PresetDefinition>;

    async fn delete_preset(&self, name: &str) -> MediaConvertResult<()>;

    /// List up to `max_results` jobs and return how many came back.
    async fn list_jobs(&self, max_results: i32) -> MediaConvertResult<usize>;
}

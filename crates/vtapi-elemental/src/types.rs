//! Elemental Conductor XML request/response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Jobs
// =============================================================================

/// Job envelope posted to `/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "job")]
pub struct Job {
    pub input: Input,
    pub priority: u32,
    pub output_group: OutputGroup,
    #[serde(rename = "stream_assembly", default)]
    pub stream_assemblies: Vec<StreamAssembly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub file_input: Location,
}

/// A file location with the credentials needed to access it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGroup {
    pub order: u32,
    pub file_group_settings: FileGroupSettings,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(rename = "output", default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroupSettings {
    pub destination: Location,
}

/// A file to emit; refers to a stream assembly by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub stream_assembly_name: String,
    pub order: u32,
    pub extension: String,
}

/// What to encode: pairs a stream name with a backend preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamAssembly {
    pub name: String,
    pub preset: String,
}

/// Reference to a job, as returned by `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRef {
    #[serde(rename = "@href")]
    pub href: String,
}

impl JobRef {
    /// Job identifier: the last segment of the href.
    pub fn id(&self) -> &str {
        href_id(&self.href)
    }
}

/// Job state, as returned by `GET /jobs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobReport {
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pct_complete: Option<String>,
    #[serde(default)]
    pub submitted: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub complete_time: Option<String>,
    #[serde(default)]
    pub errored_time: Option<String>,
    #[serde(default)]
    pub error_messages: Option<ErrorMessages>,
}

impl JobReport {
    /// Job identifier from the href, if the backend sent one.
    pub fn id(&self) -> Option<&str> {
        Some(href_id(&self.href)).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorMessages {
    #[serde(rename = "error", default)]
    pub errors: Vec<JobError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /jobs/{id}/cancel`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename = "cancel")]
pub struct Cancel {}

// =============================================================================
// Presets
// =============================================================================

/// Preset as stored on the Conductor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "preset")]
pub struct ElementalPreset {
    #[serde(rename = "@href", default, skip_serializing)]
    pub href: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub container: String,
    pub video_description: VideoDescription,
    pub audio_description: AudioDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescription {
    pub codec: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h264_settings: Option<H264Settings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H264Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub bitrate: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interlace_mode: Option<String>,
    pub rate_control_mode: String,
    pub passes: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDescription {
    pub codec: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aac_settings: Option<AacSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AacSettings {
    pub bitrate: u64,
}

// =============================================================================
// Nodes and errors
// =============================================================================

/// Response of `GET /nodes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeList {
    #[serde(rename = "node", default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Node {
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

impl Node {
    pub fn is_active(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("active")
    }
}

/// Error document returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    #[serde(rename = "error", default)]
    pub errors: Vec<String>,
}

fn href_id(href: &str) -> &str {
    href.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

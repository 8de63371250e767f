//! Preset records.
//!
//! A `Preset` is the backend-independent description of an encoding
//! configuration, as stored by the persistence layer. Providers translate it
//! into their own preset format when it is created remotely.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rate control mode for video encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RateControl {
    /// Variable bitrate
    #[default]
    Vbr,
    /// Constant bitrate
    Cbr,
}

impl RateControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateControl::Vbr => "VBR",
            RateControl::Cbr => "CBR",
        }
    }

    /// Parse a backend value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "VBR" => Some(RateControl::Vbr),
            "CBR" => Some(RateControl::Cbr),
            _ => None,
        }
    }
}

/// Video settings of a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoPreset {
    /// Codec name (e.g. "h264")
    pub codec: String,
    /// Codec profile (e.g. "main", "high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Codec level (e.g. "3.1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_level: Option<String>,
    /// Output width in pixels; derived from the source when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Output height in pixels; derived from the source when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Bitrate in bits per second
    pub bitrate: u64,
    /// GOP size, in `gop_mode` units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_size: Option<u32>,
    /// GOP unit ("frames" or "seconds")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_mode: Option<String>,
    /// Interlace mode (e.g. "progressive")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interlace_mode: Option<String>,
}

/// Audio settings of a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AudioPreset {
    /// Codec name (e.g. "aac")
    pub codec: String,
    /// Bitrate in bits per second
    pub bitrate: u64,
}

/// Backend-independent preset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Preset {
    /// Preset name, used as the remote identifier where the backend allows it
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Container format (e.g. "mp4", "m3u8")
    pub container: String,
    #[serde(default)]
    pub rate_control: RateControl,
    #[serde(default)]
    pub two_pass: bool,
    pub video: VideoPreset,
    pub audio: AudioPreset,
}

/// A preset as read back from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemotePreset {
    /// Identifier on the provider
    pub id: String,
    /// The preset, translated back into the canonical record
    pub preset: Preset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_json() {
        let json = r#"{
            "name": "720p_mp4",
            "container": "mp4",
            "rate_control": "CBR",
            "video": {"codec": "h264", "profile": "main", "width": 1280, "height": 720, "bitrate": 2500000},
            "audio": {"codec": "aac", "bitrate": 128000}
        }"#;

        let preset: Preset = serde_json::from_str(json).unwrap();
        assert_eq!(preset.rate_control, RateControl::Cbr);
        assert!(!preset.two_pass);
        assert_eq!(preset.description, "");
        assert_eq!(preset.video.height, Some(720));
        assert_eq!(preset.video.gop_size, None);
    }

    #[test]
    fn test_rate_control_parse() {
        assert_eq!(RateControl::parse("cbr"), Some(RateControl::Cbr));
        assert_eq!(RateControl::parse(" VBR "), Some(RateControl::Vbr));
        assert_eq!(RateControl::parse("qvbr"), None);
    }
}

//! Conversion between canonical presets and MediaConvert presets.
//!
//! Only H.264 video with AAC audio in MP4 or HLS (`m3u8`) containers can be
//! expressed. Anything else is rejected before a request is made.

use vtapi_models::{AudioPreset, Preset, RemotePreset, VideoPreset};
use vtapi_provider::{ProviderError, ProviderResult};

use crate::api::{Container, PresetDefinition};
use crate::NAME;

pub fn to_definition(preset: &Preset) -> ProviderResult<PresetDefinition> {
    if preset.name.trim().is_empty() {
        return Err(invalid("preset name is required"));
    }

    let container = Container::parse(&preset.container)
        .ok_or_else(|| invalid(format!("unsupported container '{}'", preset.container)))?;

    let video = &preset.video;
    if !matches!(video.codec.trim().to_ascii_lowercase().as_str(), "h264" | "h.264") {
        return Err(invalid(format!("unsupported video codec '{}'", video.codec)));
    }
    if !preset.audio.codec.trim().eq_ignore_ascii_case("aac") {
        return Err(invalid(format!("unsupported audio codec '{}'", preset.audio.codec)));
    }

    Ok(PresetDefinition {
        name: preset.name.clone(),
        description: preset.description.clone(),
        container,
        width: video.width.map(|w| to_i32("width", w.into())).transpose()?,
        height: video.height.map(|h| to_i32("height", h.into())).transpose()?,
        video_bitrate: to_i32("video bitrate", video.bitrate)?,
        profile: video.profile.as_ref().map(|p| p.to_ascii_lowercase()),
        level: video.profile_level.clone(),
        gop_size: video.gop_size,
        interlace_mode: video.interlace_mode.as_ref().map(|m| m.to_ascii_lowercase()),
        rate_control: preset.rate_control,
        two_pass: preset.two_pass,
        audio_bitrate: to_i32("audio bitrate", preset.audio.bitrate)?,
    })
}

pub fn from_definition(definition: PresetDefinition) -> RemotePreset {
    let container = match definition.container {
        Container::Mp4 => "mp4",
        Container::M3u8 => "m3u8",
    };

    RemotePreset {
        id: definition.name.clone(),
        preset: Preset {
            name: definition.name,
            description: definition.description,
            container: container.to_string(),
            rate_control: definition.rate_control,
            two_pass: definition.two_pass,
            video: VideoPreset {
                codec: "h264".to_string(),
                profile: definition.profile,
                profile_level: definition.level,
                width: definition.width.and_then(|w| u32::try_from(w).ok()),
                height: definition.height.and_then(|h| u32::try_from(h).ok()),
                bitrate: u64::try_from(definition.video_bitrate).unwrap_or(0),
                gop_size: definition.gop_size,
                gop_mode: None,
                interlace_mode: definition.interlace_mode,
            },
            audio: AudioPreset {
                codec: "aac".to_string(),
                bitrate: u64::try_from(definition.audio_bitrate).unwrap_or(0),
            },
        },
    }
}

fn to_i32(field: &str, value: u64) -> ProviderResult<i32> {
    i32::try_from(value).map_err(|_| invalid(format!("{} {} is out of range", field, value)))
}

fn invalid(message: impl Into<String>) -> ProviderError {
    ProviderError::invalid_preset(NAME, message)
}

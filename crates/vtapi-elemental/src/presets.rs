//! Conversion between canonical presets and Conductor presets.

use vtapi_models::{AudioPreset, Preset, RateControl, RemotePreset, VideoPreset};
use vtapi_provider::{ProviderError, ProviderResult};

use crate::types::{AacSettings, AudioDescription, ElementalPreset, H264Settings, VideoDescription};
use crate::NAME;

const H264: &str = "h.264";
const AAC: &str = "aac";

/// Build the Conductor preset document for `preset`.
pub fn to_elemental(preset: &Preset) -> ProviderResult<ElementalPreset> {
    if preset.name.trim().is_empty() {
        return Err(ProviderError::invalid_preset(NAME, "preset name is required"));
    }

    let video = &preset.video;
    if !is_h264(&video.codec) {
        return Err(ProviderError::invalid_preset(
            NAME,
            format!("unsupported video codec '{}'", video.codec),
        ));
    }
    if !preset.audio.codec.eq_ignore_ascii_case(AAC) {
        return Err(ProviderError::invalid_preset(
            NAME,
            format!("unsupported audio codec '{}'", preset.audio.codec),
        ));
    }

    Ok(ElementalPreset {
        href: String::new(),
        name: preset.name.clone(),
        description: preset.description.clone(),
        container: preset.container.clone(),
        video_description: VideoDescription {
            codec: H264.to_string(),
            width: video.width,
            height: video.height,
            h264_settings: Some(H264Settings {
                profile: video.profile.clone(),
                level: video.profile_level.clone(),
                bitrate: video.bitrate,
                gop_size: video.gop_size,
                gop_mode: video.gop_mode.clone(),
                interlace_mode: video.interlace_mode.clone(),
                rate_control_mode: preset.rate_control.as_str().to_string(),
                passes: if preset.two_pass { 2 } else { 1 },
            }),
        },
        audio_description: AudioDescription {
            codec: AAC.to_string(),
            aac_settings: Some(AacSettings {
                bitrate: preset.audio.bitrate,
            }),
        },
    })
}

/// Map a stored Conductor preset back to the canonical record.
pub fn from_elemental(preset: ElementalPreset) -> RemotePreset {
    let id = href_or_name(&preset);
    let h264 = preset.video_description.h264_settings.unwrap_or_else(|| H264Settings {
        profile: None,
        level: None,
        bitrate: 0,
        gop_size: None,
        gop_mode: None,
        interlace_mode: None,
        rate_control_mode: String::new(),
        passes: 1,
    });

    let video_codec = if is_h264(&preset.video_description.codec) {
        "h264".to_string()
    } else {
        preset.video_description.codec
    };

    RemotePreset {
        id,
        preset: Preset {
            name: preset.name,
            description: preset.description,
            container: preset.container,
            rate_control: RateControl::parse(&h264.rate_control_mode).unwrap_or_default(),
            two_pass: h264.passes > 1,
            video: VideoPreset {
                codec: video_codec,
                profile: h264.profile,
                profile_level: h264.level,
                width: preset.video_description.width,
                height: preset.video_description.height,
                bitrate: h264.bitrate,
                gop_size: h264.gop_size,
                gop_mode: h264.gop_mode,
                interlace_mode: h264.interlace_mode,
            },
            audio: AudioPreset {
                codec: preset.audio_description.codec.to_ascii_lowercase(),
                bitrate: preset.audio_description.aac_settings.map(|a| a.bitrate).unwrap_or(0),
            },
        },
    }
}

fn is_h264(codec: &str) -> bool {
    matches!(codec.trim().to_ascii_lowercase().as_str(), "h264" | "h.264")
}

fn href_or_name(preset: &ElementalPreset) -> String {
    preset
        .href
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| preset.name.clone())
}

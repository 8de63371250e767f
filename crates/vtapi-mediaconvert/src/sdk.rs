//! [`MediaConvertApi`] over the AWS SDK.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_mediaconvert::config::http::HttpResponse;
use aws_sdk_mediaconvert::config::{Builder, Region};
use aws_sdk_mediaconvert::error::{DisplayErrorContext, SdkError};
use aws_sdk_mediaconvert::primitives::DateTime as AwsDateTime;
use aws_sdk_mediaconvert::types as mc;
use aws_sdk_mediaconvert::Client;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;
use vtapi_models::RateControl;
use vtapi_provider::metrics::record_backend_request;
use vtapi_provider::MediaConvertConfig;

use crate::api::{Container, JobRequest, JobSnapshot, MediaConvertApi, PresetDefinition};
use crate::error::{MediaConvertApiError, MediaConvertResult};
use crate::NAME;

const AUDIO_SELECTOR: &str = "Audio Selector 1";
const AAC_SAMPLE_RATE: i32 = 48_000;
const TWO_PASS: &str = "MULTI_PASS_HQ";
const SINGLE_PASS: &str = "SINGLE_PASS";

/// MediaConvert client for an account endpoint.
#[derive(Clone)]
pub struct SdkMediaConvert {
    client: Client,
}

impl SdkMediaConvert {
    /// Create a client. The configuration must already be validated.
    pub fn new(config: &MediaConvertConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "mediaconvert",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint.trim())
            .region(Region::new(config.region_or_default().to_string()))
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
        }
    }
}

#[async_trait]
impl MediaConvertApi for SdkMediaConvert {
    async fn create_job(&self, request: &JobRequest) -> MediaConvertResult<String> {
        debug!(provider = NAME, input = %request.input_file, outputs = request.outputs.len(), "Creating job");

        let output = timed(
            "create_job",
            self.client
                .create_job()
                .role(&request.role)
                .set_queue(request.queue.clone())
                .settings(job_settings(request))
                .send(),
        )
        .await?;

        output
            .job()
            .and_then(|job| opt::<str>(job.id()))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| MediaConvertApiError::invalid_response("create_job", "job created without an id"))
    }

    async fn get_job(&self, job_id: &str) -> MediaConvertResult<JobSnapshot> {
        let output = timed("get_job", self.client.get_job().id(job_id).send()).await?;
        let job = output
            .job()
            .ok_or_else(|| MediaConvertApiError::invalid_response("get_job", "response has no job"))?;

        let timing = job.timing();
        Ok(JobSnapshot {
            id: opt::<str>(job.id()).unwrap_or(job_id).to_string(),
            status: job.status().map(|s| s.as_str().to_string()).unwrap_or_default(),
            percent_complete: job.job_percent_complete(),
            submit_time: timing.and_then(|t| t.submit_time()).and_then(to_chrono),
            start_time: timing.and_then(|t| t.start_time()).and_then(to_chrono),
            finish_time: timing.and_then(|t| t.finish_time()).and_then(to_chrono),
            error_message: job.error_message().map(str::to_string),
        })
    }

    async fn cancel_job(&self, job_id: &str) -> MediaConvertResult<()> {
        timed("cancel_job", self.client.cancel_job().id(job_id).send()).await?;
        Ok(())
    }

    async fn create_preset(&self, preset: &PresetDefinition) -> MediaConvertResult<String> {
        timed(
            "create_preset",
            self.client
                .create_preset()
                .name(&preset.name)
                .description(&preset.description)
                .settings(preset_settings(preset))
                .send(),
        )
        .await?;
        Ok(preset.name.clone())
    }

    async fn get_preset(&self, name: &str) -> MediaConvertResult<PresetDefinition> {
        let output = timed("get_preset", self.client.get_preset().name(name).send()).await?;
        let preset = output
            .preset()
            .ok_or_else(|| MediaConvertApiError::invalid_response("get_preset", "response has no preset"))?;
        let settings = opt::<mc::PresetSettings>(preset.settings())
            .ok_or_else(|| MediaConvertApiError::invalid_response("get_preset", "preset has no settings"))?;

        let name = opt::<str>(preset.name()).unwrap_or(name);
        definition_from_settings(name, preset.description().unwrap_or_default(), settings)
    }

    async fn delete_preset(&self, name: &str) -> MediaConvertResult<()> {
        timed("delete_preset", self.client.delete_preset().name(name).send()).await?;
        Ok(())
    }

    async fn list_jobs(&self, max_results: i32) -> MediaConvertResult<usize> {
        let output = timed("list_jobs", self.client.list_jobs().max_results(max_results).send()).await?;
        Ok(opt::<[mc::Job]>(output.jobs()).map_or(0, |jobs| jobs.len()))
    }
}

/// Await an SDK call, recording metrics and mapping the error.
async fn timed<T, E, F>(operation: &'static str, call: F) -> MediaConvertResult<T>
where
    F: Future<Output = Result<T, SdkError<E, HttpResponse>>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let started = Instant::now();
    let result = call.await;
    record_backend_request(NAME, operation, result.is_ok(), started);
    result.map_err(|err| sdk_error(operation, err))
}

fn sdk_error<E>(operation: &'static str, err: SdkError<E, HttpResponse>) -> MediaConvertApiError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|response| response.status().as_u16());
    MediaConvertApiError::api(operation, status, DisplayErrorContext(&err).to_string())
}

/// Accept SDK accessors that return either a reference or an optional one.
fn opt<'a, T: ?Sized>(value: impl Into<Option<&'a T>>) -> Option<&'a T> {
    value.into()
}

fn to_chrono(time: &AwsDateTime) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.secs(), time.subsec_nanos()).single()
}

// =============================================================================
// Request construction
// =============================================================================

fn job_settings(request: &JobRequest) -> mc::JobSettings {
    let input = mc::Input::builder()
        .file_input(&request.input_file)
        .audio_selectors(
            AUDIO_SELECTOR,
            mc::AudioSelector::builder()
                .default_selection(mc::AudioDefaultSelection::from("DEFAULT"))
                .build(),
        )
        .build();

    let outputs = request
        .outputs
        .iter()
        .map(|output| {
            mc::Output::builder()
                .preset(&output.preset)
                .name_modifier(&output.name_modifier)
                .build()
        })
        .collect();

    let output_group = mc::OutputGroup::builder()
        .output_group_settings(
            mc::OutputGroupSettings::builder()
                .r#type(mc::OutputGroupType::from("FILE_GROUP_SETTINGS"))
                .file_group_settings(
                    mc::FileGroupSettings::builder()
                        .destination(&request.destination)
                        .build(),
                )
                .build(),
        )
        .set_outputs(Some(outputs))
        .build();

    mc::JobSettings::builder()
        .inputs(input)
        .output_groups(output_group)
        .build()
}

fn preset_settings(preset: &PresetDefinition) -> mc::PresetSettings {
    let mut h264 = mc::H264Settings::builder()
        .bitrate(preset.video_bitrate)
        .rate_control_mode(mc::H264RateControlMode::from(preset.rate_control.as_str()))
        .quality_tuning_level(mc::H264QualityTuningLevel::from(if preset.two_pass {
            TWO_PASS
        } else {
            SINGLE_PASS
        }))
        .set_codec_profile(
            preset
                .profile
                .as_deref()
                .map(|p| mc::H264CodecProfile::from(p.to_ascii_uppercase().as_str())),
        )
        .set_codec_level(
            preset
                .level
                .as_deref()
                .map(|l| mc::H264CodecLevel::from(codec_level(l).as_str())),
        )
        .set_interlace_mode(
            preset
                .interlace_mode
                .as_deref()
                .map(|m| mc::H264InterlaceMode::from(m.to_ascii_uppercase().as_str())),
        );
    if let Some(gop_size) = preset.gop_size {
        h264 = h264
            .gop_size(f64::from(gop_size))
            .gop_size_units(mc::H264GopSizeUnits::from("FRAMES"));
    }

    let video = mc::VideoDescription::builder()
        .set_width(preset.width)
        .set_height(preset.height)
        .codec_settings(
            mc::VideoCodecSettings::builder()
                .codec(mc::VideoCodec::from("H_264"))
                .h264_settings(h264.build())
                .build(),
        )
        .build();

    let audio = mc::AudioDescription::builder()
        .codec_settings(
            mc::AudioCodecSettings::builder()
                .codec(mc::AudioCodec::from("AAC"))
                .aac_settings(
                    mc::AacSettings::builder()
                        .bitrate(preset.audio_bitrate)
                        .coding_mode(mc::AacCodingMode::from("CODING_MODE_2_0"))
                        .sample_rate(AAC_SAMPLE_RATE)
                        .build(),
                )
                .build(),
        )
        .build();

    mc::PresetSettings::builder()
        .video_description(video)
        .audio_descriptions(audio)
        .container_settings(
            mc::ContainerSettings::builder()
                .container(mc::ContainerType::from(preset.container.as_str()))
                .build(),
        )
        .build()
}

// =============================================================================
// Response parsing
// =============================================================================

fn definition_from_settings(
    name: &str,
    description: &str,
    settings: &mc::PresetSettings,
) -> MediaConvertResult<PresetDefinition> {
    let container = settings
        .container_settings()
        .and_then(|c| c.container())
        .map(|c| c.as_str())
        .unwrap_or_default();
    let container = Container::parse(container).ok_or_else(|| {
        MediaConvertApiError::invalid_response("get_preset", format!("unsupported container '{}'", container))
    })?;

    let video = settings.video_description();
    let h264 = video
        .and_then(|v| v.codec_settings())
        .and_then(|c| c.h264_settings())
        .ok_or_else(|| MediaConvertApiError::invalid_response("get_preset", "preset has no H.264 settings"))?;

    let audio_bitrate = opt::<[mc::AudioDescription]>(settings.audio_descriptions())
        .and_then(|descriptions| descriptions.first())
        .and_then(|a| a.codec_settings())
        .and_then(|c| c.aac_settings())
        .and_then(|a| a.bitrate())
        .unwrap_or(0);

    Ok(PresetDefinition {
        name: name.to_string(),
        description: description.to_string(),
        container,
        width: video.and_then(|v| v.width()),
        height: video.and_then(|v| v.height()),
        video_bitrate: h264.bitrate().unwrap_or(0),
        profile: h264.codec_profile().map(|p| p.as_str().to_ascii_lowercase()),
        level: h264.codec_level().map(|l| canonical_level(l.as_str())),
        gop_size: h264.gop_size().filter(|g| *g >= 0.0).map(|g| g.round() as u32),
        interlace_mode: h264.interlace_mode().map(|m| m.as_str().to_ascii_lowercase()),
        rate_control: h264
            .rate_control_mode()
            .and_then(|m| RateControl::parse(m.as_str()))
            .unwrap_or_default(),
        two_pass: h264.quality_tuning_level().map(|q| q.as_str()) == Some(TWO_PASS),
        audio_bitrate,
    })
}

/// `3.1` to `LEVEL_3_1`; `auto` to `AUTO`.
fn codec_level(level: &str) -> String {
    let level = level.trim();
    if level.eq_ignore_ascii_case("auto") {
        "AUTO".to_string()
    } else {
        format!("LEVEL_{}", level.replace('.', "_"))
    }
}

fn canonical_level(level: &str) -> String {
    match level.strip_prefix("LEVEL_") {
        Some(level) => level.replace('_', "."),
        None => level.to_ascii_lowercase(),
    }
}

//! AWS Elemental MediaConvert provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use vtapi_models::{Capabilities, JobSpec, JobStatus, Preset, RemotePreset};
use vtapi_provider::{
    normalize, MediaConvertConfig, NativeStatusReport, ProviderConfig, ProviderResult, TranscodingProvider,
};

use crate::api::MediaConvertApi;
use crate::builder::build_job_request;
use crate::presets::{from_definition, to_definition};
use crate::sdk::SdkMediaConvert;
use crate::status::STATUS_TABLE;
use crate::NAME;

const INPUT_FORMATS: &[&str] = &["h264"];
/// Output formats a job may target. `webm` outputs are accepted on jobs that
/// reference presets managed in the MediaConvert console, but `create_preset`
/// only builds MP4 and HLS presets and rejects a `webm` container.
const OUTPUT_FORMATS: &[&str] = &["mp4", "hls", "webm"];
const DESTINATIONS: &[&str] = &["s3"];

pub struct MediaConvertProvider {
    api: Arc<dyn MediaConvertApi>,
    config: MediaConvertConfig,
}

impl MediaConvertProvider {
    /// Create a provider with the SDK client.
    pub fn new(config: &MediaConvertConfig) -> ProviderResult<Self> {
        config.validate(NAME)?;
        Ok(Self {
            api: Arc::new(SdkMediaConvert::new(config)),
            config: config.clone(),
        })
    }

    /// Create a provider over an existing API implementation.
    pub fn with_api(config: &MediaConvertConfig, api: Arc<dyn MediaConvertApi>) -> ProviderResult<Self> {
        config.validate(NAME)?;
        Ok(Self {
            api,
            config: config.clone(),
        })
    }
}

/// Registry factory for the MediaConvert provider.
pub fn factory(config: &ProviderConfig) -> ProviderResult<Arc<dyn TranscodingProvider>> {
    let provider = MediaConvertProvider::new(&config.media_convert)?;
    Ok(Arc::new(provider))
}

#[async_trait]
impl TranscodingProvider for MediaConvertProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn submit(&self, job: &JobSpec) -> ProviderResult<JobStatus> {
        let request = build_job_request(job, &self.config);
        let job_id = self.api.create_job(&request).await?;

        info!(
            provider = NAME,
            job_id = %job_id,
            destination = %request.destination,
            presets = job.presets.len(),
            "Job submitted"
        );
        Ok(JobStatus::queued(NAME, job_id))
    }

    async fn poll_status(&self, provider_job_id: &str) -> ProviderResult<JobStatus> {
        let snapshot = self.api.get_job(provider_job_id).await?;
        let (status, detail) = normalize(&STATUS_TABLE, NativeStatusReport::from(snapshot));

        debug!(provider = NAME, job_id = provider_job_id, status = %status, "Polled job status");
        Ok(JobStatus {
            provider_name: NAME.into(),
            provider_job_id: provider_job_id.to_string(),
            status,
            detail,
        })
    }

    async fn cancel(&self, provider_job_id: &str) -> ProviderResult<()> {
        self.api.cancel_job(provider_job_id).await?;
        info!(provider = NAME, job_id = provider_job_id, "Job cancel requested");
        Ok(())
    }

    async fn create_preset(&self, preset: &Preset) -> ProviderResult<String> {
        let definition = to_definition(preset)?;
        let name = self.api.create_preset(&definition).await?;
        info!(provider = NAME, preset = %name, "Preset created");
        Ok(name)
    }

    async fn get_preset(&self, preset_id: &str) -> ProviderResult<RemotePreset> {
        let definition = self.api.get_preset(preset_id).await?;
        Ok(from_definition(definition))
    }

    async fn delete_preset(&self, preset_id: &str) -> ProviderResult<()> {
        self.api.delete_preset(preset_id).await?;
        info!(provider = NAME, preset = preset_id, "Preset deleted");
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::from_static(INPUT_FORMATS, OUTPUT_FORMATS, DESTINATIONS)
    }

    async fn healthcheck(&self) -> ProviderResult<()> {
        let jobs = self.api.list_jobs(1).await?;
        debug!(provider = NAME, jobs, "Healthcheck passed");
        Ok(())
    }
}

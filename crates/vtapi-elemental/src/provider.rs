//! Elemental Conductor provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vtapi_models::{Capabilities, JobSpec, JobStatus, Preset, RemotePreset};
use vtapi_provider::{
    normalize, ElementalConductorConfig, NativeStatusReport, ProviderConfig, ProviderError, ProviderResult,
    TranscodingProvider,
};

use crate::builder::{build_job, JobSettings};
use crate::client::{ElementalApi, ElementalClient};
use crate::presets::{from_elemental, to_elemental};
use crate::status::STATUS_TABLE;
use crate::NAME;

const INPUT_FORMATS: &[&str] = &["prores", "h264"];
const OUTPUT_FORMATS: &[&str] = &["mp4", "hls", "webm"];
const DESTINATIONS: &[&str] = &["akamai", "s3"];

/// Provider backed by an Elemental Conductor cluster.
pub struct ElementalConductorProvider {
    client: Arc<dyn ElementalApi>,
    settings: JobSettings,
}

impl ElementalConductorProvider {
    /// Create a provider with the HTTP client.
    pub fn new(config: &ElementalConductorConfig) -> ProviderResult<Self> {
        config.validate(NAME)?;
        let client = ElementalClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
            settings: JobSettings::from(config),
        })
    }

    /// Create a provider over an existing API implementation.
    pub fn with_client(config: &ElementalConductorConfig, client: Arc<dyn ElementalApi>) -> ProviderResult<Self> {
        config.validate(NAME)?;
        Ok(Self {
            client,
            settings: JobSettings::from(config),
        })
    }
}

/// Registry factory for the Elemental Conductor provider.
pub fn factory(config: &ProviderConfig) -> ProviderResult<Arc<dyn TranscodingProvider>> {
    let provider = ElementalConductorProvider::new(&config.elemental_conductor)?;
    Ok(Arc::new(provider))
}

#[async_trait]
impl TranscodingProvider for ElementalConductorProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn submit(&self, job: &JobSpec) -> ProviderResult<JobStatus> {
        let request = build_job(job, &self.settings);
        debug!(
            provider = NAME,
            source = %job.source,
            outputs = request.output_group.outputs.len(),
            "Submitting job"
        );

        let job_ref = self.client.post_job(&request).await?;
        let job_id = job_ref.id().to_string();

        info!(provider = NAME, job_id = %job_id, presets = job.presets.len(), "Job submitted");
        Ok(JobStatus::queued(NAME, job_id))
    }

    async fn poll_status(&self, provider_job_id: &str) -> ProviderResult<JobStatus> {
        let report = self.client.get_job(provider_job_id).await?;
        let (status, detail) = normalize(&STATUS_TABLE, NativeStatusReport::from(report));

        debug!(provider = NAME, job_id = provider_job_id, status = %status, "Polled job status");
        Ok(JobStatus {
            provider_name: NAME.into(),
            provider_job_id: provider_job_id.to_string(),
            status,
            detail,
        })
    }

    async fn cancel(&self, provider_job_id: &str) -> ProviderResult<()> {
        self.client.cancel_job(provider_job_id).await?;
        info!(provider = NAME, job_id = provider_job_id, "Job cancel requested");
        Ok(())
    }

    async fn create_preset(&self, preset: &Preset) -> ProviderResult<String> {
        let request = to_elemental(preset)?;
        let stored = self.client.post_preset(&request).await?;

        let name = if stored.name.is_empty() { request.name } else { stored.name };
        info!(provider = NAME, preset = %name, "Preset created");
        Ok(name)
    }

    async fn get_preset(&self, preset_id: &str) -> ProviderResult<RemotePreset> {
        let stored = self.client.get_preset(preset_id).await?;
        Ok(from_elemental(stored))
    }

    async fn delete_preset(&self, preset_id: &str) -> ProviderResult<()> {
        self.client.delete_preset(preset_id).await?;
        info!(provider = NAME, preset = preset_id, "Preset deleted");
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::from_static(INPUT_FORMATS, OUTPUT_FORMATS, DESTINATIONS)
    }

    async fn healthcheck(&self) -> ProviderResult<()> {
        let nodes = self.client.get_nodes().await?;
        let active = nodes.iter().filter(|n| n.is_active()).count();
        if active == 0 {
            warn!(provider = NAME, nodes = nodes.len(), "No active Conductor nodes");
            return Err(ProviderError::backend_request(NAME, None, "no active nodes"));
        }
        debug!(provider = NAME, active, total = nodes.len(), "Healthcheck passed");
        Ok(())
    }
}

//! The transcoding provider contract.

use async_trait::async_trait;
use vtapi_models::{Capabilities, JobSpec, JobStatus, Preset, RemotePreset};

use crate::error::ProviderResult;

/// Capability set every transcoding backend implements.
///
/// Implementations hold an immutable client handle and no per-job state, so a
/// single instance can serve concurrent calls. Each operation performs at most
/// the backend round trips it needs and never retries; every value returned
/// is expressed in the canonical model.
#[async_trait]
pub trait TranscodingProvider: Send + Sync {
    /// Name the provider is registered under.
    fn name(&self) -> &'static str;

    /// Submit a job. The returned status is `queued` with the backend job id.
    async fn submit(&self, job: &JobSpec) -> ProviderResult<JobStatus>;

    /// Fetch the current status of a job.
    async fn poll_status(&self, provider_job_id: &str) -> ProviderResult<JobStatus>;

    /// Request cancellation of a job. Does not wait for the backend to stop.
    async fn cancel(&self, provider_job_id: &str) -> ProviderResult<()>;

    /// Create a preset on the backend and return its identifier.
    async fn create_preset(&self, preset: &Preset) -> ProviderResult<String>;

    /// Read a preset back from the backend.
    async fn get_preset(&self, preset_id: &str) -> ProviderResult<RemotePreset>;

    /// Delete a preset from the backend.
    async fn delete_preset(&self, preset_id: &str) -> ProviderResult<()>;

    /// Formats and destinations supported by this provider.
    fn capabilities(&self) -> Capabilities;

    /// Check that the backend is reachable and able to take jobs.
    async fn healthcheck(&self) -> ProviderResult<()>;
}

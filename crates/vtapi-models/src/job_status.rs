//! Canonical job status returned by every provider.
//!
//! A `JobStatus` is built fresh from each backend response and never
//! mutated afterwards; persisting it is up to the caller.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::job::ProviderName;

/// Backend-independent job state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Accepted by the backend, waiting to run
    Queued,
    /// Being processed by the backend
    Started,
    /// Completed successfully
    Finished,
    /// Failed, or reported in a state we do not recognize
    Failed,
    /// Canceled on request
    Canceled,
    /// Completed and archived by the backend
    Archived,
}

impl Status {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Queued => "queued",
            Status::Started => "started",
            Status::Finished => "finished",
            Status::Failed => "failed",
            Status::Canceled => "canceled",
            Status::Archived => "archived",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Queued | Status::Started)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic fields reported by the backend.
///
/// Every field is optional and only set when the backend supplied a
/// meaningful value: zero timestamps and empty error lists are left out so
/// the detail never implies an event that did not happen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusDetail {
    /// Status string exactly as the backend reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_status: Option<String>,

    /// Completion percentage, as reported (string form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_complete: Option<String>,

    /// When the backend accepted the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<DateTime<Utc>>,

    /// When processing started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// When processing completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<DateTime<Utc>>,

    /// When the job errored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errored_time: Option<DateTime<Utc>>,

    /// Error messages reported by the backend
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_messages: Vec<String>,
}

impl StatusDetail {
    /// True when no diagnostic field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Status of a job on a provider, in the canonical model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobStatus {
    /// Provider that owns the job
    pub provider_name: ProviderName,
    /// Job identifier assigned by the provider
    pub provider_job_id: String,
    /// Canonical status
    pub status: Status,
    /// Backend diagnostics
    #[serde(default, skip_serializing_if = "StatusDetail::is_empty")]
    pub detail: StatusDetail,
}

impl JobStatus {
    /// Status of a job the backend just accepted.
    pub fn queued(provider_name: impl Into<ProviderName>, provider_job_id: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            provider_job_id: provider_job_id.into(),
            status: Status::Queued,
            detail: StatusDetail::default(),
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

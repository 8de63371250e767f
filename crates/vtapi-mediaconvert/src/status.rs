//! Native job status mapping.

use vtapi_models::Status;
use vtapi_provider::{NativeStatusReport, StatusTable};

use crate::api::JobSnapshot;
use crate::NAME;

pub const STATUS_TABLE: StatusTable = StatusTable::new(
    NAME,
    &[
        ("submitted", Status::Queued),
        ("progressing", Status::Started),
        ("complete", Status::Finished),
        ("canceled", Status::Canceled),
        ("error", Status::Failed),
    ],
);

impl From<JobSnapshot> for NativeStatusReport {
    fn from(job: JobSnapshot) -> Self {
        // Finish time means completion or failure depending on the state.
        let (complete_time, errored_time) = match STATUS_TABLE.lookup(&job.status) {
            Some(Status::Finished) => (job.finish_time, None),
            Some(Status::Failed) => (None, job.finish_time),
            _ => (None, None),
        };

        Self {
            status: job.status,
            pct_complete: job
                .percent_complete
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or(0),
            submitted: job.submit_time,
            start_time: job.start_time,
            complete_time,
            errored_time,
            error_messages: job.error_message.into_iter().collect(),
        }
    }
}

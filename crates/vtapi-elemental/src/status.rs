//! Native job status mapping.

use chrono::{DateTime, Utc};
use vtapi_models::Status;
use vtapi_provider::{NativeStatusReport, StatusTable};

use crate::types::JobReport;
use crate::NAME;

/// Conductor job states. Lookups ignore case.
pub const STATUS_TABLE: StatusTable = StatusTable::new(
    NAME,
    &[
        ("pending", Status::Queued),
        ("preprocessing", Status::Started),
        ("running", Status::Started),
        ("postprocessing", Status::Started),
        ("complete", Status::Finished),
        ("cancelled", Status::Canceled),
        ("archived", Status::Archived),
    ],
);

const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parse a Conductor timestamp. Empty or malformed values are absent.
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, OFFSET_FORMAT))
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

impl From<JobReport> for NativeStatusReport {
    fn from(report: JobReport) -> Self {
        let pct_complete = report
            .pct_complete
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(0);

        Self {
            pct_complete,
            submitted: parse_timestamp(report.submitted.as_deref()),
            start_time: parse_timestamp(report.start_time.as_deref()),
            complete_time: parse_timestamp(report.complete_time.as_deref()),
            errored_time: parse_timestamp(report.errored_time.as_deref()),
            error_messages: report
                .error_messages
                .map(|m| m.errors.into_iter().map(|e| e.message).collect())
                .unwrap_or_default(),
            status: report.status,
        }
    }
}

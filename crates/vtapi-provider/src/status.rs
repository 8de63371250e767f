//! Status normalization.
//!
//! Each backend declares a [`StatusTable`] mapping its native status strings
//! onto the canonical [`Status`]. Lookups are case-insensitive and anything
//! missing from the table is classified as `failed`.

use chrono::{DateTime, Utc};
use tracing::warn;
use vtapi_models::{Status, StatusDetail};

use crate::metrics::record_unrecognized_status;

/// Fixed mapping from native status strings to canonical statuses.
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    provider: &'static str,
    entries: &'static [(&'static str, Status)],
}

impl StatusTable {
    /// Entries must be lower case.
    pub const fn new(provider: &'static str, entries: &'static [(&'static str, Status)]) -> Self {
        Self { provider, entries }
    }

    /// Look up a native status without the fail-closed default.
    pub fn lookup(&self, native: &str) -> Option<Status> {
        let native = native.trim();
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(native))
            .map(|(_, status)| *status)
    }

    /// Classify a native status. Unknown values map to `failed`.
    pub fn classify(&self, native: &str) -> Status {
        match self.lookup(native) {
            Some(status) => status,
            None => {
                warn!(
                    provider = self.provider,
                    native_status = native,
                    "Unrecognized backend status, reporting job as failed"
                );
                record_unrecognized_status(self.provider, native);
                Status::Failed
            }
        }
    }
}

/// Status fields as read from a backend response, before normalization.
#[derive(Debug, Clone, Default)]
pub struct NativeStatusReport {
    pub status: String,
    pub pct_complete: u32,
    pub submitted: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub complete_time: Option<DateTime<Utc>>,
    pub errored_time: Option<DateTime<Utc>>,
    pub error_messages: Vec<String>,
}

/// Normalize a native report into the canonical status and its detail.
///
/// The percentage is always reported. Timestamps are kept only when set to
/// something other than the zero instant, and error messages only when at
/// least one non-blank message exists.
pub fn normalize(table: &StatusTable, report: NativeStatusReport) -> (Status, StatusDetail) {
    let status = table.classify(&report.status);

    let error_messages: Vec<String> = report
        .error_messages
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    let detail = StatusDetail {
        native_status: Some(report.status),
        pct_complete: Some(report.pct_complete.to_string()),
        submitted: non_zero(report.submitted),
        start_time: non_zero(report.start_time),
        complete_time: non_zero(report.complete_time),
        errored_time: non_zero(report.errored_time),
        error_messages,
    };

    (status, detail)
}

fn non_zero(time: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    time.filter(|t| t.timestamp() != 0 || t.timestamp_subsec_nanos() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TABLE: StatusTable = StatusTable::new(
        "test",
        &[
            ("pending", Status::Queued),
            ("running", Status::Started),
            ("complete", Status::Finished),
            ("cancelled", Status::Canceled),
        ],
    );

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(TABLE.classify("COMPLETE"), Status::Finished);
        assert_eq!(TABLE.classify("complete"), Status::Finished);
        assert_eq!(TABLE.classify("Complete"), Status::Finished);
        assert_eq!(TABLE.classify(" Running "), Status::Started);
    }

    #[test]
    fn test_unknown_status_fails_closed() {
        assert_eq!(TABLE.classify("unknown_state"), Status::Failed);
        assert_eq!(TABLE.classify(""), Status::Failed);
        assert_eq!(TABLE.lookup("unknown_state"), None);
    }

    #[test]
    fn test_zero_timestamps_are_dropped() {
        let report = NativeStatusReport {
            status: "Complete".into(),
            pct_complete: 100,
            start_time: Some(Utc.with_ymd_and_hms(2016, 1, 5, 15, 10, 17).unwrap()),
            complete_time: Some(Utc.timestamp_opt(0, 0).unwrap()),
            errored_time: None,
            ..Default::default()
        };

        let (status, detail) = normalize(&TABLE, report);
        assert_eq!(status, Status::Finished);
        assert_eq!(detail.pct_complete.as_deref(), Some("100"));
        assert_eq!(detail.native_status.as_deref(), Some("Complete"));
        assert!(detail.start_time.is_some());
        assert!(detail.complete_time.is_none());

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("complete_time").is_none());
        assert!(json.get("start_time").is_some());
    }

    #[test]
    fn test_non_zero_complete_time_is_kept() {
        let complete = Utc.with_ymd_and_hms(2016, 1, 5, 15, 30, 0).unwrap();
        let report = NativeStatusReport {
            status: "complete".into(),
            complete_time: Some(complete),
            ..Default::default()
        };

        let (_, detail) = normalize(&TABLE, report);
        assert_eq!(detail.complete_time, Some(complete));
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("complete_time").is_some());
    }

    #[test]
    fn test_percent_always_present_and_errors_sparse() {
        let (status, detail) = normalize(
            &TABLE,
            NativeStatusReport {
                status: "pending".into(),
                error_messages: vec!["  ".into()],
                ..Default::default()
            },
        );
        assert_eq!(status, Status::Queued);
        assert_eq!(detail.pct_complete.as_deref(), Some("0"));
        assert!(detail.error_messages.is_empty());

        let (status, detail) = normalize(
            &TABLE,
            NativeStatusReport {
                status: "exploded".into(),
                error_messages: vec!["Input file not found".into()],
                ..Default::default()
            },
        );
        assert_eq!(status, Status::Failed);
        assert_eq!(detail.error_messages, vec!["Input file not found"]);
    }
}

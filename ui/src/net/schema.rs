//! Wire types for the factuality backend.
//!
//! Everything the backend sends is decoded into these shapes at the
//! network boundary; a payload that does not fit (including an unknown
//! `status` string) fails with a decode error instead of leaking loose
//! fields into the views.

use serde::{Deserialize, Serialize};

/// Lifecycle states a backend task reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
    Error,
    Cancelled,
}

impl TaskStatus {
    /// Whether polling stops at this status.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

/// `POST /analyze` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    pub task_id: String,
}

/// `POST /cancel/{task_id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    pub message: String,
}

/// One extracted claim with its truthfulness label and citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default)]
    pub num: Option<u32>,
    pub extracted_claim: String,
    pub label: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Run metadata. Field names follow the backend exactly, its `temprature`
/// spelling included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(default)]
    pub finished_time: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub openai_model: Option<String>,
    #[serde(default)]
    pub temprature: Option<f64>,
    #[serde(default)]
    pub perplexity_model: Option<String>,
}

/// A task's full result payload, as served by `GET /result/{task_id}` and
/// by the static sample documents. Pending polls carry only the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<ReportMetadata>,
    #[serde(default, rename = "data")]
    pub claims: Vec<Claim>,
    pub status: TaskStatus,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pending_poll_decodes_without_data() {
        let report: AnalysisReport =
            serde_json::from_value(json!({ "status": "pending" })).unwrap();
        assert_eq!(report.status, TaskStatus::Pending);
        assert!(report.claims.is_empty());
        assert!(report.task_id.is_none());
    }

    #[test]
    fn finished_report_decodes_backend_shape() {
        let report: AnalysisReport = serde_json::from_value(json!({
            "task_id": "abc",
            "metadata": {
                "finished_time": "2026-08-01T12:30:00Z",
                "file_name": "episode.mp3",
                "openai_model": "gpt-5-mini",
                "temprature": 0.2,
                "perplexity_model": "sonar"
            },
            "data": [
                {
                    "num": 1,
                    "extracted_claim": "Water boils at 100C at sea level.",
                    "label": "True",
                    "sources": ["* https://example.org/boiling"]
                }
            ],
            "status": "done"
        }))
        .unwrap();

        assert_eq!(report.status, TaskStatus::Done);
        assert_eq!(report.claims.len(), 1);
        assert_eq!(report.claims[0].num, Some(1));
        let metadata = report.metadata.unwrap();
        assert_eq!(metadata.temprature, Some(0.2));
        assert_eq!(metadata.file_name.as_deref(), Some("episode.mp3"));
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        let result: Result<AnalysisReport, _> =
            serde_json::from_value(json!({ "status": "paused" }));
        assert!(result.is_err());
    }

    #[test]
    fn error_report_carries_message() {
        let report: AnalysisReport = serde_json::from_value(json!({
            "task_id": "abc",
            "status": "error",
            "error": "transcription failed"
        }))
        .unwrap();
        assert!(report.status.is_terminal());
        assert_eq!(report.error.as_deref(), Some("transcription failed"));
    }

    #[test]
    fn terminal_covers_everything_but_pending() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(TaskStatus::Done.is_terminal());
        assert!(TaskStatus::Error.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
    }
}

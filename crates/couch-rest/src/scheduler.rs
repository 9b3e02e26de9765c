//! Replication scheduler documents and jobs.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::enums::ReplicationState;

/// Scheduler view of one replication document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerDocument {
    /// Database the replication document lives in.
    pub database: String,

    /// Replication document id.
    pub doc_id: String,

    /// Consecutive errors for this replication.
    pub error_count: i64,

    /// Replication id, once assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Statistics for a running replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SchedulerInfo>,

    /// Last state-change time, RFC3339.
    pub last_updated: DateTime<FixedOffset>,

    /// Cluster node running the replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,

    /// Replication source description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Source proxy, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_proxy: Option<String>,

    /// Replication start time, RFC3339.
    pub start_time: DateTime<FixedOffset>,

    /// Current replication state.
    pub state: ReplicationState,

    /// Replication target description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Target proxy, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_proxy: Option<String>,
}

/// Counters for a running replication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_pending: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpointed_source_seq: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_revisions_found: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions_checked: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_seq: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub through_seq: Option<String>,
}

/// A page of scheduler documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerDocsResult {
    /// Total number of replication documents.
    pub total_rows: i64,

    /// The documents.
    pub docs: Vec<SchedulerDocument>,
}

/// A scheduler job for a running replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJob {
    /// Database the replication document lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Replication document id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    /// Recent job state transitions.
    pub history: Vec<SchedulerJobEvent>,

    /// Replication id.
    pub id: String,

    /// Statistics for the running replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SchedulerInfo>,

    /// Cluster node running the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,

    /// Replication process id on the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    /// Replication source description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Job start time, RFC3339.
    pub start_time: DateTime<FixedOffset>,

    /// Replication target description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// User who started the replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One state transition in a scheduler job's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJobEvent {
    /// Reason for the transition, when the scheduler recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Event time, RFC3339.
    pub timestamp: DateTime<FixedOffset>,

    /// Event type (`started`, `crashed`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// A page of scheduler jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJobsResult {
    /// Total number of jobs.
    pub total_rows: i64,

    /// The jobs.
    pub jobs: Vec<SchedulerJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_document_parses_rfc3339_with_offset() {
        let json = r#"{
            "database": "_replicator",
            "doc_id": "rep1",
            "error_count": 0,
            "id": "abc+continuous",
            "last_updated": "2024-03-01T12:30:00+02:00",
            "start_time": "2024-03-01T10:00:00Z",
            "state": "running",
            "source": "https://a.example/db/",
            "target": "https://b.example/db/"
        }"#;

        let doc: SchedulerDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.state, ReplicationState::RUNNING);
        // Offset preserved, not normalized to UTC.
        assert_eq!(doc.last_updated.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(doc.start_time.offset().local_minus_utc(), 0);

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["last_updated"], "2024-03-01T12:30:00+02:00");
    }

    #[test]
    fn test_scheduler_document_requires_timestamps() {
        let err = serde_json::from_str::<SchedulerDocument>(
            r#"{"database":"_replicator","doc_id":"r","error_count":0,"state":"pending"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("last_updated"));
    }

    #[test]
    fn test_scheduler_job_event_type_key() {
        let event: SchedulerJobEvent = serde_json::from_str(
            r#"{"timestamp":"2024-01-01T00:00:00Z","type":"started"}"#,
        )
        .unwrap();
        assert_eq!(event.kind, "started");

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["type"], "started");
    }

    #[test]
    fn test_scheduler_jobs_result_parse() {
        let json = r#"{
            "total_rows": 1,
            "jobs": [{
                "database": "_replicator",
                "doc_id": "rep1",
                "history": [{"timestamp": "2024-01-01T00:00:00Z", "type": "added"}],
                "id": "abc",
                "node": "node1@127.0.0.1",
                "pid": "<0.123.0>",
                "start_time": "2024-01-01T00:00:00Z"
            }]
        }"#;

        let result: SchedulerJobsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_rows, 1);
        assert_eq!(result.jobs[0].history.len(), 1);
    }
}

//! Server-level entities: metadata, sessions, membership, tasks, and
//! capacity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::{ActiveTaskType, UpStatus};

/// Generic `{"ok": true}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ok {
    /// True on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
}

/// Server metadata from `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInformation {
    /// Cluster-wide welcome string.
    pub couchdb: String,

    /// Enabled feature names.
    pub features: Vec<String>,

    /// Hosting-provider feature names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_flags: Option<Vec<String>>,

    /// Server vendor.
    pub vendor: ServerVendor,

    /// Server version string.
    pub version: String,
}

/// Server vendor. Beyond `name`, vendors add arbitrary string-valued keys
/// (`variant`, `version`), preserved here and constrained to strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVendor {
    /// Vendor name.
    pub name: String,

    /// Extra vendor keys, all string-valued.
    #[serde(flatten)]
    pub properties: HashMap<String, String>,
}

/// Session details from `GET /_session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInformation {
    /// True when the session is valid.
    pub ok: bool,

    /// Authentication context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SessionAuthentication>,

    /// User context of the session. `name` is null for the admin party.
    #[serde(rename = "userCtx")]
    pub user_ctx: crate::replication::UserContext,
}

/// How a session was (or can be) authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAuthentication {
    /// Handler that authenticated this session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<String>,

    /// Configured authentication database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_db: Option<String>,

    /// Enabled authentication handlers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_handlers: Option<Vec<String>>,
}

/// Cluster membership from `GET /_membership`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipInformation {
    /// All nodes known to the cluster.
    pub all_nodes: Vec<String>,

    /// Nodes participating in the cluster.
    pub cluster_nodes: Vec<String>,
}

/// UUIDs generated by `GET /_uuids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidsResult {
    /// The generated identifiers.
    pub uuids: Vec<String>,
}

/// One entry from `GET /_active_tasks`. Timestamps are epoch seconds and
/// stay numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTask {
    /// Bulk-get attempts made by a replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_get_attempts: Option<i64>,

    /// Bulk-get docs fetched by a replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_get_docs: Option<i64>,

    /// Processed changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_done: Option<i64>,

    /// Changes not yet replicated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_pending: Option<i64>,

    /// Source sequence persisted in the last checkpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_interval: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpointed_source_seq: Option<String>,

    /// True for a continuous replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,

    /// Database the task runs against.
    pub database: String,

    /// Replication document id, for replications started from a document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    /// Document write failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<i64>,

    /// Documents read from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<i64>,

    /// Documents written to the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<i64>,

    /// Indexer: design document being indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_document: Option<String>,

    /// Indexer: index name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Indexer processed changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer_pid: Option<String>,

    /// Missing revisions found on the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_revisions_found: Option<i64>,

    /// Cluster node running the task.
    pub node: String,

    /// Task phase (`ids` or `view` for compactions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Erlang process id of the task.
    pub pid: String,

    /// Task progress, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,

    /// Replication id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_id: Option<String>,

    /// True when the replication was retried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,

    /// Revisions checked against the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions_checked: Option<i64>,

    /// Replication source description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Source sequence at replication start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_seq: Option<String>,

    /// Task start time, epoch seconds.
    pub started_on: i64,

    /// Replication target description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Sequence the replication has reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub through_seq: Option<String>,

    /// Total changes to process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_changes: Option<i64>,

    /// Task type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActiveTaskType>,

    /// Last status update, epoch seconds.
    pub updated_on: i64,

    /// User who started the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// View shards remaining (search indexer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<i64>,
}

/// Event-type filter for the activity tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTrackerEvents {
    /// Event types to report.
    pub types: Vec<String>,
}

/// Result of `GET /_up`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpInformation {
    /// Observed cluster seeds and their status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeds: Option<serde_json::Map<String, serde_json::Value>>,

    /// Server status.
    pub status: UpStatus,
}

/// Provisioned-capacity response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityThroughputInformation {
    /// Capacity in effect now.
    pub current: CapacityThroughputInformationCurrent,

    /// Requested capacity, when a change is in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CapacityThroughputInformationTarget>,
}

/// Capacity currently in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityThroughputInformationCurrent {
    /// Throughput at this capacity.
    pub throughput: ThroughputInformation,
}

/// Requested capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityThroughputInformationTarget {
    /// Throughput at the requested capacity.
    pub throughput: ThroughputInformation,
}

/// Operations per second granted at a capacity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputInformation {
    /// Provisioned capacity blocks.
    pub blocks: i64,

    /// Lookups per second.
    pub query: i64,

    /// Reads per second.
    pub read: i64,

    /// Writes per second.
    pub write: i64,
}

/// Capacity-change request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentThroughputInformation {
    /// Current consumed throughput.
    pub throughput: CurrentThroughputInformationThroughput,
}

/// Consumed operations per second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentThroughputInformationThroughput {
    /// Lookups per second consumed.
    pub query: i64,

    /// Reads per second consumed.
    pub read: i64,

    /// Writes per second consumed.
    pub write: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_information_vendor_extras() {
        let json = r#"{
            "couchdb": "Welcome",
            "features": ["access-ready", "partitioned"],
            "vendor": {"name": "IBM Cloudant", "variant": "paas", "version": "8162"},
            "version": "3.2.1"
        }"#;

        let info: ServerInformation = serde_json::from_str(json).unwrap();
        assert_eq!(info.vendor.name, "IBM Cloudant");
        assert_eq!(info.vendor.properties["variant"], "paas");

        // Vendor extras must be strings.
        assert!(serde_json::from_str::<ServerVendor>(
            r#"{"name": "x", "build": 7}"#
        )
        .is_err());
    }

    #[test]
    fn test_session_information_null_name() {
        let json = r#"{
            "ok": true,
            "info": {"authenticated": "cookie", "authentication_handlers": ["cookie", "default"]},
            "userCtx": {"name": null, "roles": ["_admin"]}
        }"#;

        let session: SessionInformation = serde_json::from_str(json).unwrap();
        assert!(session.user_ctx.name.is_none());
        assert_eq!(session.user_ctx.roles, vec!["_admin"]);
    }

    #[test]
    fn test_active_task_epoch_timestamps_stay_numeric() {
        let json = r#"{
            "database": "shards/00000000-ffffffff/events.1234",
            "node": "node1@127.0.0.1",
            "pid": "<0.109.0>",
            "started_on": 1700000000,
            "updated_on": 1700000060,
            "type": "indexer",
            "design_document": "_design/demo",
            "progress": 55
        }"#;

        let task: ActiveTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.started_on, 1700000000);
        assert_eq!(task.kind, Some(ActiveTaskType::INDEXER));

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["updated_on"], 1700000060);
    }

    #[test]
    fn test_up_information_parse() {
        let up: UpInformation = serde_json::from_str(r#"{"status": "ok", "seeds": {}}"#).unwrap();
        assert_eq!(up.status, UpStatus::OK);
    }

    #[test]
    fn test_capacity_information_parse() {
        let json = r#"{
            "current": {"throughput": {"blocks": 1, "query": 5, "read": 100, "write": 50}},
            "target": {"throughput": {"blocks": 2, "query": 10, "read": 200, "write": 100}}
        }"#;

        let info: CapacityThroughputInformation = serde_json::from_str(json).unwrap();
        assert_eq!(info.current.throughput.read, 100);
        assert_eq!(info.target.as_ref().unwrap().throughput.blocks, 2);
    }

    #[test]
    fn test_membership_and_uuids() {
        let membership: MembershipInformation = serde_json::from_str(
            r#"{"all_nodes": ["a@x"], "cluster_nodes": ["a@x", "b@y"]}"#,
        )
        .unwrap();
        assert_eq!(membership.cluster_nodes.len(), 2);

        let uuids: UuidsResult =
            serde_json::from_str(r#"{"uuids": ["75480ca477454894678e22eec6002413"]}"#).unwrap();
        assert_eq!(uuids.uuids.len(), 1);
    }
}

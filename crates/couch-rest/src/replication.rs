//! Replication documents and their supporting types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{Attachment, DocumentRevisionStatus, Revisions};

/// A `_replicator` database document: a regular document plus the fixed set
/// of replication-control fields. `source` and `target` are required.
/// Admits arbitrary extra keys, preserved through parse/serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDocument {
    #[serde(rename = "_attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Attachment>>,

    #[serde(rename = "_conflicts", skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,

    #[serde(rename = "_deleted", skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    #[serde(rename = "_deleted_conflicts", skip_serializing_if = "Option::is_none")]
    pub deleted_conflicts: Option<Vec<String>>,

    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_local_seq", skip_serializing_if = "Option::is_none")]
    pub local_seq: Option<String>,

    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    #[serde(rename = "_revisions", skip_serializing_if = "Option::is_none")]
    pub revisions: Option<Revisions>,

    #[serde(rename = "_revs_info", skip_serializing_if = "Option::is_none")]
    pub revs_info: Option<Vec<DocumentRevisionStatus>>,

    /// Cancel an ongoing replication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel: Option<bool>,

    /// Seconds between checkpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_interval: Option<i64>,

    /// HTTP connection timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<i64>,

    /// Run the replication continuously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,

    /// Create the target database if it does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_target: Option<bool>,

    /// Parameters for target creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_target_params: Option<ReplicationCreateTargetParameters>,

    /// Replicate only these document ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_ids: Option<Vec<String>>,

    /// Filter function reference (`ddoc/filtername`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Maximum simultaneous HTTP connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_connections: Option<i64>,

    /// Replication owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Parameters passed to the filter function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<HashMap<String, String>>,

    /// Per-request retry budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries_per_request: Option<i64>,

    /// Selector filtering the replicated documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Map<String, Value>>,

    /// Start the replication from this sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_seq: Option<String>,

    /// Erlang socket options string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_options: Option<String>,

    /// Replication source.
    pub source: ReplicationDatabase,

    /// Proxy for source requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_proxy: Option<String>,

    /// Replication target.
    pub target: ReplicationDatabase,

    /// Proxy for target requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_proxy: Option<String>,

    /// Use `_bulk_get` against the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_bulk_get: Option<bool>,

    /// Record checkpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_checkpoints: Option<bool>,

    /// User context under which the replication runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ctx: Option<UserContext>,

    /// Replicate winning revisions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_revs_only: Option<bool>,

    /// Documents per worker batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_batch_size: Option<i64>,

    /// Number of worker processes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_processes: Option<i64>,

    /// Extra keys beyond the declared fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ReplicationDocument {
    /// Create a replication document from required source and target.
    pub fn new(source: ReplicationDatabase, target: ReplicationDatabase) -> Self {
        Self {
            attachments: None,
            conflicts: None,
            deleted: None,
            deleted_conflicts: None,
            id: None,
            local_seq: None,
            rev: None,
            revisions: None,
            revs_info: None,
            cancel: None,
            checkpoint_interval: None,
            connection_timeout: None,
            continuous: None,
            create_target: None,
            create_target_params: None,
            doc_ids: None,
            filter: None,
            http_connections: None,
            owner: None,
            query_params: None,
            retries_per_request: None,
            selector: None,
            since_seq: None,
            socket_options: None,
            source,
            source_proxy: None,
            target,
            target_proxy: None,
            use_bulk_get: None,
            use_checkpoints: None,
            user_ctx: None,
            winning_revs_only: None,
            worker_batch_size: None,
            worker_processes: None,
            properties: Map::new(),
        }
    }
}

/// A replication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabase {
    /// Endpoint authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<ReplicationDatabaseAuth>,

    /// Extra headers sent to the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Endpoint URL.
    pub url: String,
}

impl ReplicationDatabase {
    /// Create an endpoint from a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            auth: None,
            headers: None,
            url: url.into(),
        }
    }
}

/// Authentication for a replication endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuth {
    /// Basic credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<ReplicationDatabaseAuthBasic>,

    /// IAM credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<ReplicationDatabaseAuthIam>,
}

/// Basic credentials for a replication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthBasic {
    pub password: String,
    pub username: String,
}

/// IAM credentials for a replication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthIam {
    /// IAM API key.
    pub api_key: String,
}

/// Parameters applied when the replicator creates the target database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationCreateTargetParameters {
    /// Replica count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,

    /// Create the target partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,

    /// Shard count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<i64>,
}

/// A server user context: name plus roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Database the context applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,

    /// User name.
    pub name: Option<String>,

    /// Granted roles.
    pub roles: Vec<String>,
}

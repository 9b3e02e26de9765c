//! Database-level entities: information, partitions, and shards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Database metadata from `GET /{db}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInformation {
    /// Cluster topology of the database.
    pub cluster: DatabaseInformationCluster,

    /// True while the database is compacting.
    pub compact_running: bool,

    /// An opaque string describing the committed state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_update_seq: Option<String>,

    /// An opaque string describing compaction state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compacted_seq: Option<String>,

    /// Database name.
    pub db_name: String,

    /// Version of the physical on-disk format.
    pub disk_format_version: i64,

    /// Number of documents, excluding deleted ones.
    pub doc_count: i64,

    /// Number of deleted documents.
    pub doc_del_count: i64,

    /// Engine name (`couch_bt_engine`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Server epoch the database was created in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_start_time: Option<String>,

    /// True when the database is partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes_count: Option<i64>,

    /// Maximum partitioned indexes allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes_limit: Option<i64>,

    /// Database properties.
    pub props: DatabaseInformationProps,

    /// Content sizes.
    pub sizes: ContentInformationSizes,

    /// An opaque string describing the database state.
    pub update_seq: String,

    /// UUID of the database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Cluster topology of a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInformationCluster {
    /// Replica count.
    pub n: i64,

    /// Shard count.
    pub q: i64,

    /// Read quorum.
    pub r: i64,

    /// Write quorum.
    pub w: i64,
}

/// Database properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInformationProps {
    /// True when the database is partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

/// Sizes of stored content in bytes. Individual sizes may be null while
/// the server recalculates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInformationSizes {
    /// Live data size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,

    /// Uncompressed external representation size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<i64>,

    /// Size on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<i64>,
}

/// Result of `POST /_dbs_info` for one requested database. `info` is
/// absent when the database does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbsInfoResult {
    /// Error name, when the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Database information, when the database exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<DatabaseInformation>,

    /// Requested database name.
    pub key: String,
}

/// Partition metadata from `GET /{db}/_partition/{key}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionInformation {
    /// Database name.
    pub db_name: String,

    /// Number of documents in the partition.
    pub doc_count: i64,

    /// Number of deleted documents in the partition.
    pub doc_del_count: i64,

    /// Partitioned index counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes: Option<PartitionInformationIndexes>,

    /// Partition key.
    pub partition: String,

    /// Partition content sizes.
    pub sizes: PartitionInformationSizes,
}

/// Partitioned index counts for a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInformationIndexes {
    /// Count by index type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<PartitionInformationIndexesIndexes>,

    /// Maximum partitioned indexes allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Total partitioned indexes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Partitioned index count by type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInformationIndexesIndexes {
    /// Search index count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<i64>,

    /// View index count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<i64>,
}

/// Content sizes of one partition, in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInformationSizes {
    /// Live data size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,

    /// Uncompressed external representation size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<i64>,
}

/// Shard map from `GET /{db}/_shards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardsInformation {
    /// Shard ranges mapped to the nodes holding a replica.
    pub shards: HashMap<String, Vec<String>>,
}

/// Nodes holding a specific document, from `GET /{db}/_shards/{doc_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentShardInfo {
    /// Nodes holding a replica of the document's shard.
    pub nodes: Vec<String>,

    /// Shard range containing the document.
    pub range: String,
}

//! MapReduce view queries and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;

/// Body of a view query. Keys are arbitrary JSON values, matching what the
/// map function emitted. Unset fields are omitted from the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Include encoding information for compressed attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub att_encoding_info: Option<bool>,

    /// Include attachment bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<bool>,

    /// Include conflict information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,

    /// Reverse the key order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,

    /// Include the emitting document with each row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,

    /// Include rows with key equal to `end_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive_end: Option<bool>,

    /// Maximum rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Rows skipped before the first returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    /// Include the database update sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<bool>,

    /// Stop at this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<Value>,

    /// Stop at this document id, for rows sharing `end_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key_doc_id: Option<String>,

    /// Group reduce results by key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,

    /// Group reduce results by key prefix of this length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_level: Option<i64>,

    /// Return only rows with this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,

    /// Return only rows with these keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Value>>,

    /// Run the reduce function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,

    /// Allow results from a stale index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,

    /// Start at this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<Value>,

    /// Start at this document id, for rows sharing `start_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key_doc_id: Option<String>,

    /// Index update mode: `true`, `false`, or `lazy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

/// Result of a view query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewResult {
    /// Total rows in the view, absent for reduced results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<i64>,

    /// Database update sequence, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<String>,

    /// The rows.
    pub rows: Vec<ViewResultRow>,
}

/// One view row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResultRow {
    /// Underlying error, when the failure wraps another one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,

    /// Error name for this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error reason for this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The emitting document, when `include_docs` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,

    /// Id of the emitting document, absent for reduced rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Emitted key. May legitimately be JSON `null`.
    pub key: Value,

    /// Emitted or reduced value. May legitimately be JSON `null`.
    pub value: Value,
}

/// Result of a multi-query view request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQueriesResult {
    /// One result per query, in request order.
    pub results: Vec<ViewResult>,
}

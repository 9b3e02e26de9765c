//! Documents, revisions, and attachments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_ext::base64_bytes;

/// A CouchDB document: a handful of reserved underscore-prefixed keys plus
/// unbounded user fields of arbitrary JSON type.
///
/// User fields live in `properties` and round-trip losslessly: parsing a
/// JSON object and serializing it again preserves every key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Attachments keyed by name.
    #[serde(rename = "_attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Attachment>>,

    /// Revision ids of conflicting revisions.
    #[serde(rename = "_conflicts", skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,

    /// Deletion flag.
    #[serde(rename = "_deleted", skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// Revision ids of deleted conflicting revisions.
    #[serde(rename = "_deleted_conflicts", skip_serializing_if = "Option::is_none")]
    pub deleted_conflicts: Option<Vec<String>>,

    /// Document id.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Local sequence number of the document in the shard.
    #[serde(rename = "_local_seq", skip_serializing_if = "Option::is_none")]
    pub local_seq: Option<String>,

    /// Current revision.
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Revision history.
    #[serde(rename = "_revisions", skip_serializing_if = "Option::is_none")]
    pub revisions: Option<Revisions>,

    /// Per-revision status, as returned with `revs_info=true`.
    #[serde(rename = "_revs_info", skip_serializing_if = "Option::is_none")]
    pub revs_info: Option<Vec<DocumentRevisionStatus>>,

    /// User fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Document {
    /// Create an empty document with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set a user field.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Get a user field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Document revision history: `ids` are revision hashes, newest first;
/// the first id corresponds to revision number `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revisions {
    /// Revision id hashes, newest first.
    pub ids: Vec<String>,
    /// The revision number of the first id.
    pub start: i64,
}

/// Status of one revision of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRevisionStatus {
    /// The revision.
    pub rev: String,
    /// `available`, `missing`, or `deleted`.
    pub status: String,
}

/// A document attachment: either inline (`data` carries the bytes) or a
/// stub (`stub = true`, metadata only) on a given retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment media type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Inline attachment bytes. Base64 on the wire; binary here.
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<u8>>,

    /// Content digest (`md5-` prefixed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Length of the encoded form, when `encoding` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_length: Option<i64>,

    /// Compression codec applied by the server (`gzip`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// True when the attachment body follows in a multipart part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follows: Option<bool>,

    /// Uncompressed attachment length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,

    /// Revision number the attachment was added at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revpos: Option<i64>,

    /// True when only metadata is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub: Option<bool>,
}

/// Per-document outcome of a write: either `ok` with the new revision, or
/// an error name and reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Underlying error, when the failure wraps another one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,

    /// Error name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The document id.
    pub id: String,

    /// True on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,

    /// Error reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The new revision, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

/// Missing-revision information for one document in a `_revs_diff` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevsDiff {
    /// Revisions the target does not have.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,

    /// Revisions that may be ancestors of the missing ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_ancestors: Option<Vec<String>>,
}

//! Changes feeds: per-database `_changes` and server-wide `_db_updates`.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::enums::DbEventType;

/// Result of a `_changes` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangesResult {
    /// Sequence of the last reported change.
    pub last_seq: String,

    /// Changes remaining after this page.
    pub pending: i64,

    /// The changes.
    pub results: Vec<ChangesResultItem>,
}

/// One changed document in a `_changes` feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangesResultItem {
    /// Leaf revisions of the document.
    pub changes: Vec<Change>,

    /// True when the change is a deletion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// The document, when `include_docs` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,

    /// Changed document id.
    pub id: String,

    /// Update sequence of this change.
    pub seq: String,
}

/// One leaf revision in a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// The revision.
    pub rev: String,
}

/// Result of a `_db_updates` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbUpdates {
    /// Sequence of the last reported event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seq: Option<String>,

    /// The events.
    pub results: Vec<DbEvent>,
}

/// One database lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbEvent {
    /// Database the event applies to.
    pub db_name: String,

    /// Update sequence of the event.
    pub seq: String,

    /// Event type.
    #[serde(rename = "type")]
    pub kind: DbEventType,
}

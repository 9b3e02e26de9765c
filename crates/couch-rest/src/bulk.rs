//! Bulk write (`_bulk_docs`) and bulk fetch (`_bulk_get`) payloads.

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentResult};

/// Body of a `_bulk_docs` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDocs {
    /// Documents to write.
    pub docs: Vec<Document>,

    /// When false, revisions are taken as given instead of generated;
    /// used by replicators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_edits: Option<bool>,
}

impl BulkDocs {
    /// Create a bulk write from a list of documents.
    pub fn new(docs: Vec<Document>) -> Self {
        Self {
            docs,
            new_edits: None,
        }
    }
}

/// One document request in a `_bulk_get` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkGetQueryDocument {
    /// Attachments added since these revisions are included inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atts_since: Option<Vec<String>>,

    /// Document id.
    pub id: String,

    /// Specific revision to fetch, default winning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl BulkGetQueryDocument {
    /// Request the winning revision of a document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            atts_since: None,
            id: id.into(),
            rev: None,
        }
    }
}

/// Result of a `_bulk_get` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResult {
    /// One item per requested document.
    pub results: Vec<BulkGetResultItem>,
}

/// Results for one requested document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResultItem {
    /// One entry per leaf revision, each either a document or an error.
    pub docs: Vec<BulkGetResultDocument>,

    /// The requested document id.
    pub id: String,
}

/// One revision in a `_bulk_get` item: exactly one of `ok` or `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResultDocument {
    /// The failure, when the revision could not be returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DocumentResult>,

    /// The document, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_docs_new_edits_omitted_by_default() {
        let bulk = BulkDocs::new(vec![Document::with_id("a")]);
        let json = serde_json::to_value(&bulk).unwrap();
        assert_eq!(json, serde_json::json!({"docs": [{"_id": "a"}]}));
    }

    #[test]
    fn test_bulk_docs_replicator_mode() {
        let mut doc = Document::with_id("a");
        doc.rev = Some("7-abc".to_string());
        let bulk = BulkDocs {
            docs: vec![doc],
            new_edits: Some(false),
        };

        let json = serde_json::to_value(&bulk).unwrap();
        assert_eq!(json["new_edits"], false);
    }

    #[test]
    fn test_bulk_get_result_mixed_outcomes() {
        let json = r#"{
            "results": [
                {"id": "a", "docs": [{"ok": {"_id": "a", "_rev": "1-x"}}]},
                {"id": "missing", "docs": [{"error": {
                    "id": "missing", "error": "not_found", "reason": "missing"
                }}]}
            ]
        }"#;

        let result: BulkGetResult = serde_json::from_str(json).unwrap();
        assert!(result.results[0].docs[0].ok.is_some());
        let error = result.results[1].docs[0].error.as_ref().unwrap();
        assert_eq!(error.error.as_deref(), Some("not_found"));
    }
}

//! Design documents and their index definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::ContentInformationSizes;
use crate::document::{Attachment, DocumentRevisionStatus, Revisions};
use crate::enums::AnalyzerName;

/// A design document: a regular document whose reserved keys additionally
/// carry view, index, and validation definitions. Admits arbitrary extra
/// keys, preserved through parse/serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
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

    /// Keep view indexes up to date on document writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoupdate: Option<bool>,

    /// Filter functions by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<HashMap<String, String>>,

    /// Search index definitions by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<HashMap<String, SearchIndexDefinition>>,

    /// Query-server language, defaults to `javascript` server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Design document options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<DesignDocumentOptions>,

    /// Update-validation function source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_doc_update: Option<String>,

    /// View definitions by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<HashMap<String, DesignDocumentViewsMapReduce>>,

    /// Extra keys beyond the declared fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// Design document options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocumentOptions {
    /// Whether the design document's indexes are partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

/// A map/reduce view definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocumentViewsMapReduce {
    /// Map function source.
    pub map: String,

    /// Reduce function source or builtin name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

/// A search index definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexDefinition {
    /// Analyzer configuration for the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfiguration>,

    /// Index function source.
    pub index: String,
}

/// A single analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyzer {
    /// Analyzer name.
    pub name: AnalyzerName,

    /// Custom stopwords, for analyzers that support them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
}

/// Analyzer configuration, optionally with per-field overrides (the
/// `perfield` form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfiguration {
    /// Analyzer name.
    pub name: AnalyzerName,

    /// Custom stopwords, for analyzers that support them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,

    /// Per-field analyzers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Analyzer>>,
}

/// Metadata about a design document and its view index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentInformation {
    /// Design document name (id without the `_design/` prefix).
    pub name: String,

    /// View index state.
    pub view_index: DesignDocumentViewIndex,
}

/// State of a design document's view index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentViewIndex {
    /// Collator versions in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collator_versions: Option<Vec<String>>,

    /// True while the index is compacting.
    pub compact_running: bool,

    /// Query-server language.
    pub language: String,

    /// Index signature.
    pub signature: String,

    /// Index sizes.
    pub sizes: ContentInformationSizes,

    /// True while the indexer is running.
    pub updater_running: bool,

    /// Outstanding index updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates_pending: Option<UpdatesPending>,

    /// Clients waiting for the index.
    pub waiting_clients: i64,

    /// True when a commit is pending.
    pub waiting_commit: bool,
}

/// Outstanding view-index update counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatesPending {
    /// Updates needed to reach the minimum ready state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,

    /// Updates needed to reach the preferred state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<i64>,

    /// Total pending updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_document_round_trip() {
        let json = r#"{
            "_id": "_design/demo",
            "_rev": "1-a",
            "language": "javascript",
            "views": {"by_name": {"map": "function(doc){emit(doc.name,1)}", "reduce": "_count"}},
            "filters": {"mine": "function(doc,req){return true}"},
            "custom_key": {"anything": [1, 2]}
        }"#;

        let ddoc: DesignDocument = serde_json::from_str(json).unwrap();
        assert_eq!(ddoc.id.as_deref(), Some("_design/demo"));
        assert_eq!(
            ddoc.views.as_ref().unwrap()["by_name"].reduce.as_deref(),
            Some("_count")
        );
        assert!(ddoc.properties.contains_key("custom_key"));

        let back = serde_json::to_value(&ddoc).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_view_map_is_required() {
        let err =
            serde_json::from_str::<DesignDocumentViewsMapReduce>(r#"{"reduce":"_sum"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn test_search_index_with_perfield_analyzer() {
        let json = r#"{
            "analyzer": {
                "name": "perfield",
                "fields": {"title": {"name": "english"}, "tag": {"name": "keyword"}}
            },
            "index": "function(doc){index(\"title\", doc.title)}"
        }"#;

        let def: SearchIndexDefinition = serde_json::from_str(json).unwrap();
        let analyzer = def.analyzer.unwrap();
        assert_eq!(analyzer.name.as_str(), "perfield");
        assert_eq!(
            analyzer.fields.unwrap()["tag"].name,
            AnalyzerName::KEYWORD
        );
    }

    #[test]
    fn test_design_document_information_parse() {
        let json = r#"{
            "name": "demo",
            "view_index": {
                "compact_running": false,
                "language": "javascript",
                "signature": "abc",
                "sizes": {"active": 10, "external": 20, "file": 30},
                "updater_running": false,
                "updates_pending": {"minimum": 0, "preferred": 0, "total": 0},
                "waiting_clients": 0,
                "waiting_commit": false
            }
        }"#;

        let info: DesignDocumentInformation = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "demo");
        assert_eq!(info.view_index.sizes.file, Some(30));
    }
}

//! Search (Lucene-backed) queries, results, and index metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;

/// Body of a search query against a design document's search index.
/// `query` is required; everything else is optional and omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Lucene query syntax string.
    pub query: String,

    /// Opaque pagination token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    /// Facet counts for these field names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<String>>,

    /// Drilldown constraints: `[field, value, ...]` per entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drilldown: Option<Vec<Vec<String>>>,

    /// Group results by this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,

    /// Maximum groups returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_limit: Option<i64>,

    /// Sort order within groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sort: Option<Vec<String>>,

    /// Fields to highlight matches in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_fields: Option<Vec<String>>,

    /// Number of highlight fragments per field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_number: Option<i64>,

    /// String placed after a highlighted match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,

    /// String placed before a highlighted match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,

    /// Highlight fragment size in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_size: Option<i64>,

    /// Include the indexed document with each row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,

    /// Return only these stored fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fields: Option<Vec<String>>,

    /// Maximum rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Faceted range queries, field name to named ranges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, HashMap<String, String>>>,

    /// Sort order: `"fieldname<type>"`, optionally `-` prefixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,

    /// Accept results from a stale index (`ok`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<String>,
}

impl SearchQuery {
    /// Create a query from a Lucene query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            bookmark: None,
            counts: None,
            drilldown: None,
            group_field: None,
            group_limit: None,
            group_sort: None,
            highlight_fields: None,
            highlight_number: None,
            highlight_post_tag: None,
            highlight_pre_tag: None,
            highlight_size: None,
            include_docs: None,
            include_fields: None,
            limit: None,
            ranges: None,
            sort: None,
            stale: None,
        }
    }
}

/// Result of a search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total matching rows across all pages.
    pub total_rows: i64,

    /// Opaque pagination token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    /// Field name the results were grouped by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    /// Facet counts, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<HashMap<String, HashMap<String, i64>>>,

    /// Range facet counts, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, HashMap<String, i64>>>,

    /// The rows, absent for grouped results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<SearchResultRow>>,

    /// The groups, present for grouped results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<SearchResultProperties>>,
}

/// Shared shape of an ungrouped result and of one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultProperties {
    /// Total matching rows in this group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<i64>,

    /// Opaque pagination token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    /// Field name the results were grouped by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    /// Facet counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<HashMap<String, HashMap<String, i64>>>,

    /// Range facet counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, HashMap<String, i64>>>,

    /// The rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<SearchResultRow>>,
}

/// One search row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRow {
    /// The indexed document, when `include_docs` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,

    /// Stored fields of the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,

    /// Highlighted fragments, field name to fragments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HashMap<String, Vec<String>>>,

    /// Id of the indexed document.
    pub id: String,
}

/// Metadata about a search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInfoResult {
    /// Name of the search index.
    pub name: String,

    /// Index state.
    pub search_index: SearchIndexInfo,
}

/// State of a search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexInfo {
    /// Changes not yet indexed.
    pub pending_seq: i64,

    /// Committed sequence.
    pub committed_seq: i64,

    /// Index size on disk in bytes.
    pub disk_size: i64,

    /// Number of indexed documents.
    pub doc_count: i64,

    /// Number of deleted documents still in the index.
    pub doc_del_count: i64,

    /// Signature of the index definition.
    pub signature: String,
}

/// Result of analyzing sample text with a named analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAnalyzeResult {
    /// Tokens produced by the analyzer.
    pub tokens: Vec<String>,
}

/// Disk size of one search index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexDiskSize {
    /// Index size on disk in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<i64>,
}

/// Disk size information for a search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDiskSizeInformation {
    /// Name of the search index.
    pub name: String,

    /// Disk size of the index.
    pub search_index: SearchIndexDiskSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_minimal() {
        let query = SearchQuery::new("title:cat");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"query": "title:cat"}));

        assert!(serde_json::from_str::<SearchQuery>(r#"{"limit": 1}"#).is_err());
    }

    #[test]
    fn test_search_result_rows() {
        let json = r#"{
            "total_rows": 2,
            "bookmark": "g2wAAA",
            "rows": [
                {"id": "a", "fields": {"title": "cat"}},
                {"id": "b", "fields": {"title": "catfish"},
                 "highlights": {"title": ["<em>cat</em>fish"]}}
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_rows, 2);
        let rows = result.rows.as_ref().unwrap();
        assert_eq!(
            rows[1].highlights.as_ref().unwrap()["title"][0],
            "<em>cat</em>fish"
        );
    }

    #[test]
    fn test_search_result_grouped() {
        let json = r#"{
            "total_rows": 3,
            "groups": [
                {"by": "cat", "total_rows": 2, "rows": [{"id": "a"}, {"id": "b"}]},
                {"by": "dog", "total_rows": 1, "rows": [{"id": "c"}]}
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(result.rows.is_none());
        let groups = result.groups.as_ref().unwrap();
        assert_eq!(groups[0].rows.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_search_info_result_parse() {
        let json = r#"{
            "name": "_design/ddoc/idx",
            "search_index": {
                "pending_seq": 0,
                "committed_seq": 42,
                "disk_size": 1024,
                "doc_count": 10,
                "doc_del_count": 1,
                "signature": "abc"
            }
        }"#;

        let info: SearchInfoResult = serde_json::from_str(json).unwrap();
        assert_eq!(info.search_index.doc_count, 10);
    }

    #[test]
    fn test_search_analyze_result_parse() {
        let result: SearchAnalyzeResult =
            serde_json::from_str(r#"{"tokens": ["run", "quick"]}"#).unwrap();
        assert_eq!(result.tokens, vec!["run", "quick"]);
    }
}

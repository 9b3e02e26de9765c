//! Query descriptors and results: `_all_docs`, `_find`, `_explain`, and
//! `_index`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::design::AnalyzerConfiguration;
use crate::document::Document;
use crate::enums::IndexType;

/// Body of an `_all_docs` (or `_design_docs`, or partitioned) query.
/// Unset fields are omitted from the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllDocsQuery {
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

    /// Include the full document with each row.
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
    pub end_key: Option<String>,

    /// Return only rows with this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Return only rows with these keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,

    /// Start at this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<String>,
}

/// Result of an `_all_docs`-shaped query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllDocsResult {
    /// Total documents in the database or partition.
    pub total_rows: i64,

    /// The rows.
    pub rows: Vec<DocsResultRow>,

    /// Database update sequence, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<String>,
}

/// Result of a multi-query `_all_docs/queries` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllDocsQueriesResult {
    /// One result per query, in request order.
    pub results: Vec<AllDocsResult>,
}

/// One `_all_docs` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocsResultRow {
    /// Underlying error, when the failure wraps another one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,

    /// Error name for this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error reason for this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The document, when `include_docs` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,

    /// Document id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Row key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Row value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<DocsResultRowValue>,
}

/// Value of an `_all_docs` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsResultRowValue {
    /// True when the document is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// Winning revision.
    pub rev: String,
}

/// Body of a `_find` or `_explain` request. The selector is required;
/// everything else is optional and omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindQuery {
    /// Bookmark from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    /// Include conflict information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,

    /// Include execution statistics in the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<bool>,

    /// Project only these fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Maximum documents returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Read quorum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,

    /// The selector.
    pub selector: Map<String, Value>,

    /// Documents skipped before the first returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    /// Sort specification: one `{field: "asc"|"desc"}` object per field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<HashMap<String, String>>>,

    /// Accept stale index results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,

    /// Index update mode: `true`, `false`, or `lazy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,

    /// Restrict to a named index: `[ddoc]` or `[ddoc, name]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_index: Option<Vec<String>>,
}

impl FindQuery {
    /// Create a query from a selector.
    pub fn with_selector(selector: Map<String, Value>) -> Self {
        Self {
            bookmark: None,
            conflicts: None,
            execution_stats: None,
            fields: None,
            limit: None,
            r: None,
            selector,
            skip: None,
            sort: None,
            stable: None,
            update: None,
            use_index: None,
        }
    }
}

/// Result of a `_find` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindResult {
    /// Opaque pagination token.
    pub bookmark: String,

    /// Matching documents.
    pub docs: Vec<Document>,

    /// Execution statistics, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<ExecutionStats>,

    /// Server warning about the query (e.g. no matching index).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Execution statistics of a `_find` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub execution_time_ms: f64,
    pub results_returned: i64,
    pub total_docs_examined: i64,
    pub total_keys_examined: i64,
    pub total_quorum_docs_examined: i64,
}

/// Result of an `_explain` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    /// Whether the index covers the query (JSON indexes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering: Option<bool>,

    /// Database name.
    pub dbname: String,

    /// Projected fields, or `all_fields`.
    pub fields: Vec<String>,

    /// The index selected for the query.
    pub index: IndexInformation,

    /// Other candidate indexes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_candidates: Option<Vec<IndexCandidate>>,

    /// The limit in effect.
    pub limit: i64,

    /// Arguments passed to the underlying view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrargs: Option<ExplainResultMrArgs>,

    /// Query options in effect.
    pub opts: ExplainResultOpts,

    /// Whether the database is partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,

    /// The selector after normalization.
    pub selector: Map<String, Value>,

    /// Per-selector-field index hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector_hints: Option<Vec<SelectorHint>>,

    /// The skip in effect.
    pub skip: i64,
}

/// View arguments reported by `_explain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainResultMrArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<String>,
}

/// Query options reported by `_explain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainResultOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_index: Option<Vec<String>>,
}

/// Hints about which selector fields an index can serve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorHint {
    /// Selector fields the index can use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexable_fields: Option<Vec<String>>,

    /// Index type the hint applies to.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Selector fields the index cannot use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unindexable_fields: Option<Vec<String>>,
}

/// A candidate index considered by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexCandidate {
    /// Why the candidate was or was not usable.
    pub analysis: IndexAnalysis,

    /// The candidate index.
    pub index: IndexInformation,
}

/// Planner analysis of one candidate index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAnalysis {
    /// Whether the index covers the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering: Option<bool>,

    /// Planner ranking, lower is better.
    pub ranking: i64,

    /// Exclusion reasons, empty when usable.
    pub reasons: Vec<IndexAnalysisExclusionReason>,

    /// Whether the planner can use the index at all.
    pub usable: bool,
}

/// One reason the planner excluded an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexAnalysisExclusionReason {
    /// Machine-readable reason name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An index definition, used both when creating an index and in
/// information results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Default analyzer for a text index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_analyzer: Option<AnalyzerConfiguration>,

    /// Default field configuration for the `$text` operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_field: Option<IndexTextOperatorDefaultField>,

    /// Indexed fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IndexField>>,

    /// Index the lengths of arrays (text indexes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_array_lengths: Option<bool>,

    /// Restrict the index to documents matching this selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_filter_selector: Option<Map<String, Value>>,
}

/// One indexed field. Beyond `name`/`type`, JSON indexes carry the field
/// as an extra key mapping the field name to a sort direction, so extra
/// keys are preserved and constrained to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexField {
    /// Field name (text indexes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Field type (text indexes): `boolean`, `number`, or `string`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Extra keys: field name mapped to sort direction (`asc`/`desc`).
    #[serde(flatten)]
    pub sort_directions: HashMap<String, String>,
}

/// Configuration of the `$text` operator's default field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexTextOperatorDefaultField {
    /// Analyzer for the default field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfiguration>,

    /// Whether the default field index is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Information about one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInformation {
    /// Design document id holding the index, `null` for the special
    /// primary index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddoc: Option<String>,

    /// The index definition.
    pub def: IndexDefinition,

    /// Index name.
    pub name: String,

    /// Whether the index is partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,

    /// Index type.
    #[serde(rename = "type")]
    pub kind: IndexType,
}

/// Result of listing a database's indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexesInformation {
    /// Total indexes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<i64>,

    /// The indexes.
    pub indexes: Vec<IndexInformation>,
}

/// Result of creating an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    /// Design document id holding the new index.
    pub id: String,

    /// Index name.
    pub name: String,

    /// `created`, or `exists` when an equivalent index was already there.
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_docs_query_omits_unset_fields() {
        let query = AllDocsQuery {
            include_docs: Some(true),
            limit: Some(5),
            ..AllDocsQuery::default()
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"include_docs": true, "limit": 5}));

        let empty = serde_json::to_value(AllDocsQuery::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn test_all_docs_result_parse() {
        let json = r#"{
            "total_rows": 2,
            "rows": [
                {"id": "a", "key": "a", "value": {"rev": "1-x"}},
                {"id": "b", "key": "b", "value": {"rev": "2-y", "deleted": true}}
            ]
        }"#;

        let result: AllDocsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_rows, 2);
        assert_eq!(result.rows[1].value.as_ref().unwrap().deleted, Some(true));
    }

    #[test]
    fn test_find_query_selector_required() {
        let mut selector = Map::new();
        selector.insert("kind".to_string(), serde_json::json!("event"));
        let query = FindQuery::with_selector(selector);

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"selector": {"kind": "event"}}));

        assert!(serde_json::from_str::<FindQuery>(r#"{"limit": 1}"#).is_err());
    }

    #[test]
    fn test_find_result_parse() {
        let json = r#"{
            "bookmark": "g1AAAA",
            "docs": [{"_id": "a", "kind": "event"}],
            "execution_stats": {
                "execution_time_ms": 5.52,
                "results_returned": 1,
                "total_docs_examined": 26,
                "total_keys_examined": 0,
                "total_quorum_docs_examined": 0
            }
        }"#;

        let result: FindResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.docs.len(), 1);
        assert_eq!(
            result.execution_stats.as_ref().unwrap().total_docs_examined,
            26
        );
    }

    #[test]
    fn test_index_field_extras_are_sort_directions() {
        let json = r#"{"foo": "asc"}"#;
        let field: IndexField = serde_json::from_str(json).unwrap();
        assert_eq!(field.sort_directions["foo"], "asc");
        assert!(field.name.is_none());

        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back, serde_json::json!({"foo": "asc"}));

        // Extra values must be strings for this schema.
        assert!(serde_json::from_str::<IndexField>(r#"{"foo": 1}"#).is_err());
    }

    #[test]
    fn test_index_information_special_primary() {
        let json = r#"{
            "ddoc": null,
            "def": {"fields": [{"_id": "asc"}]},
            "name": "_all_docs",
            "type": "special"
        }"#;

        let info: IndexInformation = serde_json::from_str(json).unwrap();
        assert!(info.ddoc.is_none());
        assert_eq!(info.kind, IndexType::SPECIAL);
    }

    #[test]
    fn test_explain_result_parse() {
        let json = r#"{
            "dbname": "events",
            "fields": ["_id"],
            "index": {
                "ddoc": null,
                "def": {"fields": [{"_id": "asc"}]},
                "name": "_all_docs",
                "type": "special"
            },
            "limit": 25,
            "opts": {"bookmark": "nil", "limit": 25, "skip": 0},
            "selector": {"kind": {"$eq": "event"}},
            "skip": 0
        }"#;

        let explain: ExplainResult = serde_json::from_str(json).unwrap();
        assert_eq!(explain.dbname, "events");
        assert_eq!(explain.opts.limit, Some(25));
    }
}

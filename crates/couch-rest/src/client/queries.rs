//! Selector queries (`_find`, `_explain`) and index management.

use serde::Serialize;
use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestMethod};

use crate::enums::IndexType;
use crate::error::Result;
use crate::query::{
    ExplainResult, FindQuery, FindResult, IndexDefinition, IndexResult, IndexesInformation,
};

/// Optional parameters for `post_index`.
#[derive(Debug, Clone, Default)]
pub struct PostIndexOptions {
    /// Design document to store the index in; generated when unset.
    pub ddoc: Option<String>,
    /// Index name; generated when unset.
    pub name: Option<String>,
    /// Whether the index is partitioned; defaults to the database's mode.
    pub partitioned: Option<bool>,
    /// Index type; defaults to `json` server-side.
    pub index_type: Option<IndexType>,
}

#[derive(Serialize)]
struct IndexRequestBody<'a> {
    index: &'a IndexDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    ddoc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partitioned: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    index_type: Option<&'a IndexType>,
}

impl super::CloudantClient {
    /// Show which index a selector query would use: `POST /{db}/_explain`.
    #[instrument(skip(self, query))]
    pub async fn post_explain(
        &self,
        db: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<ExplainResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_explain", encode_path_segment(db)),
            )?
            .json(query)?;
        self.send(req, "ExplainResult").await
    }

    /// Run a selector query: `POST /{db}/_find`.
    #[instrument(skip(self, query))]
    pub async fn post_find(
        &self,
        db: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<FindResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_find", encode_path_segment(db)),
            )?
            .json(query)?;
        self.send(req, "FindResult").await
    }

    /// Run a selector query, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_find_as_stream(
        &self,
        db: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_find", encode_path_segment(db)),
            )?
            .json(query)?;
        self.send_stream(req).await
    }

    /// List a database's indexes: `GET /{db}/_index`.
    #[instrument(skip(self))]
    pub async fn get_indexes_information(
        &self,
        db: &str,
    ) -> Result<DetailedResponse<IndexesInformation>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/{}/_index", encode_path_segment(db)),
        )?;
        self.send(req, "IndexesInformation").await
    }

    /// Create an index: `POST /{db}/_index`.
    #[instrument(skip(self, index, options))]
    pub async fn post_index(
        &self,
        db: &str,
        index: &IndexDefinition,
        options: &PostIndexOptions,
    ) -> Result<DetailedResponse<IndexResult>> {
        let db = require_path_param("db", db)?;
        let body = IndexRequestBody {
            index,
            ddoc: options.ddoc.as_deref(),
            name: options.name.as_deref(),
            partitioned: options.partitioned,
            index_type: options.index_type.as_ref(),
        };
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_index", encode_path_segment(db)),
            )?
            .json(&body)?;
        self.send(req, "IndexResult").await
    }

    /// Delete an index:
    /// `DELETE /{db}/_index/_design/{ddoc}/{type}/{index}`.
    #[instrument(skip(self))]
    pub async fn delete_index(
        &self,
        db: &str,
        ddoc: &str,
        index_type: &IndexType,
        index: &str,
    ) -> Result<DetailedResponse<crate::server::Ok>> {
        let db = require_path_param("db", db)?;
        let ddoc = require_path_param("ddoc", ddoc)?;
        let index = require_path_param("index", index)?;
        let index_type = require_path_param("index_type", index_type.as_str())?;
        let req = self.request(
            RequestMethod::Delete,
            &format!(
                "/{}/_index/_design/{}/{}/{}",
                encode_path_segment(db),
                encode_path_segment(ddoc),
                encode_path_segment(index_type),
                encode_path_segment(index)
            ),
        )?;
        self.send(req, "Ok").await
    }
}

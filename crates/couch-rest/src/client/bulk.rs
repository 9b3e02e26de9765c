//! Bulk write and bulk fetch operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::bulk::{BulkDocs, BulkGetQueryDocument, BulkGetResult};
use crate::document::DocumentResult;
use crate::error::Result;

/// Optional parameters for `_bulk_get`.
#[derive(Debug, Clone, Default)]
pub struct BulkGetOptions {
    /// Include encoding information for compressed attachments.
    pub att_encoding_info: Option<bool>,
    /// Include attachment bodies.
    pub attachments: Option<bool>,
    /// Force retrieval of latest leaf revisions.
    pub latest: Option<bool>,
    /// Include revision histories.
    pub revs: Option<bool>,
}

impl super::CloudantClient {
    fn build_bulk_get(
        &self,
        db: &str,
        docs: &[BulkGetQueryDocument],
        options: &BulkGetOptions,
    ) -> Result<RequestBuilder> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_bulk_get", encode_path_segment(db)),
            )?
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("attachments", options.attachments)
            .query_opt("latest", options.latest)
            .query_opt("revs", options.revs)
            .json_value(serde_json::json!({ "docs": docs }));
        Ok(req)
    }

    /// Write a batch of documents in one request: `POST /{db}/_bulk_docs`.
    ///
    /// Returns one [`DocumentResult`] per input document, success or error.
    #[instrument(skip(self, bulk_docs))]
    pub async fn post_bulk_docs(
        &self,
        db: &str,
        bulk_docs: &BulkDocs,
    ) -> Result<DetailedResponse<Vec<DocumentResult>>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_bulk_docs", encode_path_segment(db)),
            )?
            .json(bulk_docs)?;
        self.send(req, "Vec<DocumentResult>").await
    }

    /// Fetch several documents (possibly several revisions each) in one
    /// request: `POST /{db}/_bulk_get`.
    #[instrument(skip(self, docs, options))]
    pub async fn post_bulk_get(
        &self,
        db: &str,
        docs: &[BulkGetQueryDocument],
        options: &BulkGetOptions,
    ) -> Result<DetailedResponse<BulkGetResult>> {
        let req = self.build_bulk_get(db, docs, options)?;
        self.send(req, "BulkGetResult").await
    }

    /// `_bulk_get` as `multipart/mixed` bytes, unparsed.
    #[instrument(skip(self, docs, options))]
    pub async fn post_bulk_get_as_mixed(
        &self,
        db: &str,
        docs: &[BulkGetQueryDocument],
        options: &BulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .build_bulk_get(db, docs, options)?
            .accept("multipart/mixed");
        self.send_stream(req).await
    }

    /// `_bulk_get` as `multipart/related` bytes, unparsed.
    #[instrument(skip(self, docs, options))]
    pub async fn post_bulk_get_as_related(
        &self,
        db: &str,
        docs: &[BulkGetQueryDocument],
        options: &BulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .build_bulk_get(db, docs, options)?
            .accept("multipart/related");
        self.send_stream(req).await
    }

    /// `_bulk_get` as raw JSON bytes, unparsed.
    #[instrument(skip(self, docs, options))]
    pub async fn post_bulk_get_as_stream(
        &self,
        db: &str,
        docs: &[BulkGetQueryDocument],
        options: &BulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_bulk_get(db, docs, options)?;
        self.send_stream(req).await
    }
}

//! Local (non-replicating) document operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::document::{Document, DocumentResult};
use crate::enums::Batch;
use crate::error::Result;

fn local_doc_path(db: &str, doc_id: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let doc_id = require_path_param("doc_id", doc_id)?;
    Ok(format!(
        "/{}/_local/{}",
        encode_path_segment(db),
        encode_path_segment(doc_id)
    ))
}

impl super::CloudantClient {
    /// Probe a local document: `HEAD /{db}/_local/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn head_local_document(
        &self,
        db: &str,
        doc_id: &str,
        if_none_match: Option<&str>,
    ) -> Result<DetailedResponse<()>> {
        let mut req = self.request(RequestMethod::Head, &local_doc_path(db, doc_id)?)?;
        if let Some(rev) = if_none_match {
            req = req.if_none_match(rev);
        }
        self.send_unit(req).await
    }

    /// Retrieve a local document: `GET /{db}/_local/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn get_local_document(
        &self,
        db: &str,
        doc_id: &str,
    ) -> Result<DetailedResponse<Document>> {
        let req = self.request(RequestMethod::Get, &local_doc_path(db, doc_id)?)?;
        self.send(req, "Document").await
    }

    /// Create or replace a local document: `PUT /{db}/_local/{doc_id}`.
    /// Local documents are unversioned; a put always overwrites.
    #[instrument(skip(self, document))]
    pub async fn put_local_document(
        &self,
        db: &str,
        doc_id: &str,
        document: &Document,
        batch: Option<Batch>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let req = self
            .request(RequestMethod::Put, &local_doc_path(db, doc_id)?)?
            .query_opt("batch", batch.map(|b| b.as_str().to_string()))
            .json(document)?;
        self.send(req, "DocumentResult").await
    }

    /// Delete a local document: `DELETE /{db}/_local/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn delete_local_document(
        &self,
        db: &str,
        doc_id: &str,
        batch: Option<Batch>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let req = self
            .request(RequestMethod::Delete, &local_doc_path(db, doc_id)?)?
            .query_opt("batch", batch.map(|b| b.as_str().to_string()));
        self.send(req, "DocumentResult").await
    }
}

//! Design document operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::design::{DesignDocument, DesignDocumentInformation};
use crate::document::DocumentResult;
use crate::error::Result;
use crate::query::{AllDocsQueriesResult, AllDocsQuery, AllDocsResult};

use super::documents::{DeleteDocumentOptions, GetDocumentOptions, PutDocumentOptions};

fn design_path(db: &str, ddoc: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let ddoc = require_path_param("ddoc", ddoc)?;
    Ok(format!(
        "/{}/_design/{}",
        encode_path_segment(db),
        encode_path_segment(ddoc)
    ))
}

impl super::CloudantClient {
    /// Probe a design document: `HEAD /{db}/_design/{ddoc}`.
    #[instrument(skip(self))]
    pub async fn head_design_document(
        &self,
        db: &str,
        ddoc: &str,
        if_none_match: Option<&str>,
    ) -> Result<DetailedResponse<()>> {
        let mut req = self.request(RequestMethod::Head, &design_path(db, ddoc)?)?;
        if let Some(rev) = if_none_match {
            req = req.if_none_match(rev);
        }
        self.send_unit(req).await
    }

    /// Retrieve a design document: `GET /{db}/_design/{ddoc}`.
    #[instrument(skip(self, options))]
    pub async fn get_design_document(
        &self,
        db: &str,
        ddoc: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<DesignDocument>> {
        let mut req = self
            .request(RequestMethod::Get, &design_path(db, ddoc)?)?
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("attachments", options.attachments)
            .query_opt("conflicts", options.conflicts)
            .query_opt("deleted_conflicts", options.deleted_conflicts)
            .query_opt("latest", options.latest)
            .query_opt("local_seq", options.local_seq)
            .query_opt("meta", options.meta)
            .query_opt("rev", options.rev.clone())
            .query_opt("revs", options.revs)
            .query_opt("revs_info", options.revs_info);
        if let Some(rev) = &options.if_none_match {
            req = req.if_none_match(rev.clone());
        }
        self.send(req, "DesignDocument").await
    }

    /// Create or replace a design document: `PUT /{db}/_design/{ddoc}`.
    #[instrument(skip(self, design_document, options))]
    pub async fn put_design_document(
        &self,
        db: &str,
        ddoc: &str,
        design_document: &DesignDocument,
        options: &PutDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Put, &design_path(db, ddoc)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.clone())
            .json(design_document)?;
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }

    /// Delete a design document: `DELETE /{db}/_design/{ddoc}`.
    #[instrument(skip(self, options))]
    pub async fn delete_design_document(
        &self,
        db: &str,
        ddoc: &str,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Delete, &design_path(db, ddoc)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("rev", options.rev.clone());
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }

    /// Retrieve view-index metadata for a design document:
    /// `GET /{db}/_design/{ddoc}/_info`.
    #[instrument(skip(self))]
    pub async fn get_design_document_information(
        &self,
        db: &str,
        ddoc: &str,
    ) -> Result<DetailedResponse<DesignDocumentInformation>> {
        let req = self.request(
            RequestMethod::Get,
            &format!("{}/_info", design_path(db, ddoc)?),
        )?;
        self.send(req, "DesignDocumentInformation").await
    }

    /// List design documents via the primary index:
    /// `POST /{db}/_design_docs`.
    #[instrument(skip(self, query))]
    pub async fn post_design_docs(
        &self,
        db: &str,
        query: &AllDocsQuery,
    ) -> Result<DetailedResponse<AllDocsResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_design_docs", encode_path_segment(db)),
            )?
            .json(query)?;
        self.send(req, "AllDocsResult").await
    }

    /// Run several design-document listings in one request:
    /// `POST /{db}/_design_docs/queries`.
    #[instrument(skip(self, queries))]
    pub async fn post_design_docs_queries(
        &self,
        db: &str,
        queries: &[AllDocsQuery],
    ) -> Result<DetailedResponse<AllDocsQueriesResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_design_docs/queries", encode_path_segment(db)),
            )?
            .json_value(serde_json::json!({ "queries": queries }));
        self.send(req, "AllDocsQueriesResult").await
    }
}

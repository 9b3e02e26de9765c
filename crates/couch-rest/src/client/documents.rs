//! Document CRUD operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::document::{Document, DocumentResult};
use crate::enums::Batch;
use crate::error::Result;

/// Optional parameters for document retrieval.
#[derive(Debug, Clone, Default)]
pub struct GetDocumentOptions {
    /// Include encoding information for compressed attachments.
    pub att_encoding_info: Option<bool>,
    /// Include attachment bodies.
    pub attachments: Option<bool>,
    /// Include conflict information.
    pub conflicts: Option<bool>,
    /// Include deleted-conflict revisions.
    pub deleted_conflicts: Option<bool>,
    /// `If-None-Match` header value.
    pub if_none_match: Option<String>,
    /// Force retrieval of the latest leaf revision.
    pub latest: Option<bool>,
    /// Include the document's shard-local sequence.
    pub local_seq: Option<bool>,
    /// Shorthand for conflicts, deleted_conflicts, and revs_info together.
    pub meta: Option<bool>,
    /// Retrieve this revision instead of the winner.
    pub rev: Option<String>,
    /// Include the revision history.
    pub revs: Option<bool>,
    /// Include per-revision status.
    pub revs_info: Option<bool>,
}

/// Optional parameters for document writes.
#[derive(Debug, Clone, Default)]
pub struct PutDocumentOptions {
    /// Request a non-durable 202 acknowledgement.
    pub batch: Option<Batch>,
    /// `If-Match` header value (revision precondition).
    pub if_match: Option<String>,
    /// When false, the supplied `_rev` is stored as given (replicator
    /// mode). Passed through without client-side checks.
    pub new_edits: Option<bool>,
    /// Revision being replaced, as a query parameter.
    pub rev: Option<String>,
}

/// Optional parameters for document deletion.
#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentOptions {
    /// Request a non-durable 202 acknowledgement.
    pub batch: Option<Batch>,
    /// `If-Match` header value (revision precondition).
    pub if_match: Option<String>,
    /// Revision being deleted, as a query parameter.
    pub rev: Option<String>,
}

pub(crate) fn document_path(db: &str, doc_id: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let doc_id = require_path_param("doc_id", doc_id)?;
    Ok(format!(
        "/{}/{}",
        encode_path_segment(db),
        encode_path_segment(doc_id)
    ))
}

impl super::CloudantClient {
    fn build_get_document(
        &self,
        db: &str,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<RequestBuilder> {
        let mut req = self
            .request(RequestMethod::Get, &document_path(db, doc_id)?)?
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
        Ok(req)
    }

    /// Create or update a document with a server-assigned or body-supplied
    /// id: `POST /{db}`.
    #[instrument(skip(self, document))]
    pub async fn post_document(
        &self,
        db: &str,
        document: &Document,
        batch: Option<Batch>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(RequestMethod::Post, &format!("/{}", encode_path_segment(db)))?
            .query_opt("batch", batch.map(|b| b.as_str().to_string()))
            .json(document)?;
        self.send(req, "DocumentResult").await
    }

    /// Probe a document for existence and revision: `HEAD /{db}/{doc_id}`.
    ///
    /// The winning revision is in the `ETag` response header.
    #[instrument(skip(self))]
    pub async fn head_document(
        &self,
        db: &str,
        doc_id: &str,
        if_none_match: Option<&str>,
        latest: Option<bool>,
    ) -> Result<DetailedResponse<()>> {
        let mut req = self
            .request(RequestMethod::Head, &document_path(db, doc_id)?)?
            .query_opt("latest", latest);
        if let Some(rev) = if_none_match {
            req = req.if_none_match(rev);
        }
        self.send_unit(req).await
    }

    /// Retrieve a document, parsed: `GET /{db}/{doc_id}`.
    #[instrument(skip(self, options))]
    pub async fn get_document(
        &self,
        db: &str,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<Document>> {
        let req = self.build_get_document(db, doc_id, options)?;
        self.send(req, "Document").await
    }

    /// Retrieve a document as `multipart/mixed` bytes, unparsed.
    #[instrument(skip(self, options))]
    pub async fn get_document_as_mixed(
        &self,
        db: &str,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .build_get_document(db, doc_id, options)?
            .accept("multipart/mixed");
        self.send_stream(req).await
    }

    /// Retrieve a document as `multipart/related` bytes, unparsed.
    #[instrument(skip(self, options))]
    pub async fn get_document_as_related(
        &self,
        db: &str,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .build_get_document(db, doc_id, options)?
            .accept("multipart/related");
        self.send_stream(req).await
    }

    /// Retrieve a document as raw JSON bytes, unparsed.
    #[instrument(skip(self, options))]
    pub async fn get_document_as_stream(
        &self,
        db: &str,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_get_document(db, doc_id, options)?;
        self.send_stream(req).await
    }

    /// Create or replace a document: `PUT /{db}/{doc_id}`.
    #[instrument(skip(self, document, options))]
    pub async fn put_document(
        &self,
        db: &str,
        doc_id: &str,
        document: &Document,
        options: &PutDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Put, &document_path(db, doc_id)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.clone())
            .json(document)?;
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }

    /// Delete a document: `DELETE /{db}/{doc_id}`.
    #[instrument(skip(self, options))]
    pub async fn delete_document(
        &self,
        db: &str,
        doc_id: &str,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Delete, &document_path(db, doc_id)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("rev", options.rev.clone());
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CloudantClient;
    use super::*;
    use wharf_couch_auth::NoAuthAuthenticator;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> CloudantClient {
        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();
        client
    }

    #[tokio::test]
    async fn test_get_document_with_slash_in_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mydb/a%2Fb"))
            .and(query_param("rev", "2-x"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "a/b", "_rev": "2-x", "k": 1
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let options = GetDocumentOptions {
            rev: Some("2-x".to_string()),
            ..GetDocumentOptions::default()
        };
        let response = client.get_document("mydb", "a/b", &options).await.unwrap();
        assert_eq!(response.result.id.as_deref(), Some("a/b"));
        assert_eq!(response.result.get("k"), Some(&serde_json::json!(1)));
    }

    #[tokio::test]
    async fn test_put_document_with_if_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/d/x"))
            .and(header("If-Match", "1-a"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "ok": true, "id": "x", "rev": "2-b"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let mut document = Document::default();
        document.rev = Some("1-a".to_string());
        document.set("foo", serde_json::json!("bar"));

        let options = PutDocumentOptions {
            if_match: Some("1-a".to_string()),
            ..PutDocumentOptions::default()
        };
        let response = client
            .put_document("d", "x", &document, &options)
            .await
            .unwrap();
        assert_eq!(response.result.rev.as_deref(), Some("2-b"));
    }

    #[tokio::test]
    async fn test_missing_doc_id_rejected_without_network() {
        let client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        let err = client
            .get_document("db", "", &GetDocumentOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("doc_id"));
    }

    #[tokio::test]
    async fn test_get_document_as_mixed_sets_accept_and_leaves_body_unread() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d/x"))
            .and(header("Accept", "multipart/mixed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("--boundary\r\nnot json\r\n--boundary--", "multipart/mixed"),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .get_document_as_mixed("d", "x", &GetDocumentOptions::default())
            .await
            .unwrap();

        // Body is handed back unparsed.
        let bytes = response.result.collect_bytes().await.unwrap();
        assert!(bytes.starts_with(b"--boundary"));
    }

    #[tokio::test]
    async fn test_delete_document_with_batch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/d/x"))
            .and(query_param("batch", "ok"))
            .and(query_param("rev", "1-a"))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "ok": true, "id": "x", "rev": "2-b"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let options = DeleteDocumentOptions {
            batch: Some(Batch::OK),
            rev: Some("1-a".to_string()),
            ..DeleteDocumentOptions::default()
        };
        let response = client.delete_document("d", "x", &options).await.unwrap();
        assert_eq!(response.status, 202);
    }

    #[tokio::test]
    async fn test_head_document_exposes_etag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/d/x"))
            .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"2-b\""))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.head_document("d", "x", None, None).await.unwrap();
        assert_eq!(response.header("ETag"), Some("\"2-b\""));
    }
}

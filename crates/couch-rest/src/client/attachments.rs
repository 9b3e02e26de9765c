//! Attachment operations. Bodies are raw bytes in both directions; the
//! caller-supplied content type is honored and nothing is compressed.

use bytes::Bytes;
use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestMethod};

use crate::document::DocumentResult;
use crate::error::Result;

fn attachment_path(db: &str, doc_id: &str, attachment_name: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let doc_id = require_path_param("doc_id", doc_id)?;
    let attachment_name = require_path_param("attachment_name", attachment_name)?;
    Ok(format!(
        "/{}/{}/{}",
        encode_path_segment(db),
        encode_path_segment(doc_id),
        encode_path_segment(attachment_name)
    ))
}

impl super::CloudantClient {
    /// Probe an attachment: `HEAD /{db}/{doc_id}/{attachment_name}`.
    ///
    /// Length and digest are in the `Content-Length` and `ETag` headers.
    #[instrument(skip(self))]
    pub async fn head_attachment(
        &self,
        db: &str,
        doc_id: &str,
        attachment_name: &str,
        if_none_match: Option<&str>,
        rev: Option<&str>,
    ) -> Result<DetailedResponse<()>> {
        let mut req = self
            .request(
                RequestMethod::Head,
                &attachment_path(db, doc_id, attachment_name)?,
            )?
            .query_opt("rev", rev.map(str::to_string));
        if let Some(etag) = if_none_match {
            req = req.if_none_match(etag);
        }
        self.send_unit(req).await
    }

    /// Download an attachment as a byte stream:
    /// `GET /{db}/{doc_id}/{attachment_name}` with `Accept: */*`.
    #[instrument(skip(self))]
    pub async fn get_attachment(
        &self,
        db: &str,
        doc_id: &str,
        attachment_name: &str,
        if_none_match: Option<&str>,
        rev: Option<&str>,
    ) -> Result<DetailedResponse<ByteStream>> {
        let mut req = self
            .request(
                RequestMethod::Get,
                &attachment_path(db, doc_id, attachment_name)?,
            )?
            .accept("*/*")
            .query_opt("rev", rev.map(str::to_string));
        if let Some(etag) = if_none_match {
            req = req.if_none_match(etag);
        }
        self.send_stream(req).await
    }

    /// Upload an attachment: `PUT /{db}/{doc_id}/{attachment_name}`.
    ///
    /// The bytes pass through uncompressed regardless of the gzip setting.
    #[instrument(skip(self, attachment))]
    pub async fn put_attachment(
        &self,
        db: &str,
        doc_id: &str,
        attachment_name: &str,
        attachment: impl Into<Bytes>,
        content_type: &str,
        if_match: Option<&str>,
        rev: Option<&str>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let content_type = require_path_param("content_type", content_type)?;
        let mut req = self
            .request(
                RequestMethod::Put,
                &attachment_path(db, doc_id, attachment_name)?,
            )?
            .content_type(content_type)
            .query_opt("rev", rev.map(str::to_string))
            .bytes(attachment);
        if let Some(etag) = if_match {
            req = req.if_match(etag);
        }
        self.send(req, "DocumentResult").await
    }

    /// Delete an attachment: `DELETE /{db}/{doc_id}/{attachment_name}`.
    #[instrument(skip(self))]
    pub async fn delete_attachment(
        &self,
        db: &str,
        doc_id: &str,
        attachment_name: &str,
        if_match: Option<&str>,
        rev: Option<&str>,
        batch: Option<crate::enums::Batch>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(
                RequestMethod::Delete,
                &attachment_path(db, doc_id, attachment_name)?,
            )?
            .query_opt("rev", rev.map(str::to_string))
            .query_opt("batch", batch.map(|b| b.as_str().to_string()));
        if let Some(etag) = if_match {
            req = req.if_match(etag);
        }
        self.send(req, "DocumentResult").await
    }
}

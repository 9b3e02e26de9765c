//! Replication operations: the `_replicator` database and the scheduler's
//! view of its documents and jobs.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::document::DocumentResult;
use crate::enums::{Batch, ReplicationState};
use crate::error::Result;
use crate::replication::ReplicationDocument;
use crate::scheduler::{SchedulerDocsResult, SchedulerDocument, SchedulerJob, SchedulerJobsResult};

use super::documents::{DeleteDocumentOptions, GetDocumentOptions, PutDocumentOptions};

fn replicator_doc_path(doc_id: &str) -> Result<String> {
    let doc_id = require_path_param("doc_id", doc_id)?;
    Ok(format!("/_replicator/{}", encode_path_segment(doc_id)))
}

impl super::CloudantClient {
    /// Create a replication with a generated document ID:
    /// `POST /_replicator`.
    #[instrument(skip(self, replication_document))]
    pub async fn post_replicator(
        &self,
        replication_document: &ReplicationDocument,
        batch: Option<Batch>,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let req = self
            .request(RequestMethod::Post, "/_replicator")?
            .query_opt("batch", batch.map(|b| b.as_str().to_string()))
            .json(replication_document)?;
        self.send(req, "DocumentResult").await
    }

    /// Probe a replication document: `HEAD /_replicator/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn head_replication_document(
        &self,
        doc_id: &str,
        if_none_match: Option<&str>,
    ) -> Result<DetailedResponse<()>> {
        let mut req = self.request(RequestMethod::Head, &replicator_doc_path(doc_id)?)?;
        if let Some(rev) = if_none_match {
            req = req.if_none_match(rev);
        }
        self.send_unit(req).await
    }

    /// Retrieve a replication document: `GET /_replicator/{doc_id}`.
    #[instrument(skip(self, options))]
    pub async fn get_replication_document(
        &self,
        doc_id: &str,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ReplicationDocument>> {
        let mut req = self
            .request(RequestMethod::Get, &replicator_doc_path(doc_id)?)?
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
        self.send(req, "ReplicationDocument").await
    }

    /// Create or replace a replication document:
    /// `PUT /_replicator/{doc_id}`.
    #[instrument(skip(self, replication_document, options))]
    pub async fn put_replication_document(
        &self,
        doc_id: &str,
        replication_document: &ReplicationDocument,
        options: &PutDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Put, &replicator_doc_path(doc_id)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.clone())
            .json(replication_document)?;
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }

    /// Cancel a replication by deleting its document:
    /// `DELETE /_replicator/{doc_id}`.
    #[instrument(skip(self, options))]
    pub async fn delete_replication_document(
        &self,
        doc_id: &str,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>> {
        let mut req = self
            .request(RequestMethod::Delete, &replicator_doc_path(doc_id)?)?
            .query_opt("batch", options.batch.clone().map(|b| b.as_str().to_string()))
            .query_opt("rev", options.rev.clone());
        if let Some(rev) = &options.if_match {
            req = req.if_match(rev.clone());
        }
        self.send(req, "DocumentResult").await
    }

    /// List replication documents as the scheduler sees them:
    /// `GET /_scheduler/docs`.
    #[instrument(skip(self))]
    pub async fn get_scheduler_docs(
        &self,
        limit: Option<u64>,
        skip: Option<u64>,
        states: Option<&[ReplicationState]>,
    ) -> Result<DetailedResponse<SchedulerDocsResult>> {
        let states: Option<Vec<&str>> =
            states.map(|s| s.iter().map(ReplicationState::as_str).collect());
        let req = self
            .request(RequestMethod::Get, "/_scheduler/docs")?
            .query_opt("limit", limit)
            .query_opt("skip", skip)
            .query_csv_opt("states", states.as_deref());
        self.send(req, "SchedulerDocsResult").await
    }

    /// Probe a scheduler document:
    /// `HEAD /_scheduler/docs/_replicator/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn head_scheduler_document(&self, doc_id: &str) -> Result<DetailedResponse<()>> {
        let doc_id = require_path_param("doc_id", doc_id)?;
        let req = self.request(
            RequestMethod::Head,
            &format!("/_scheduler/docs/_replicator/{}", encode_path_segment(doc_id)),
        )?;
        self.send_unit(req).await
    }

    /// Retrieve the scheduler's view of one replication document:
    /// `GET /_scheduler/docs/_replicator/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn get_scheduler_document(
        &self,
        doc_id: &str,
    ) -> Result<DetailedResponse<SchedulerDocument>> {
        let doc_id = require_path_param("doc_id", doc_id)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/_scheduler/docs/_replicator/{}", encode_path_segment(doc_id)),
        )?;
        self.send(req, "SchedulerDocument").await
    }

    /// List active replication jobs: `GET /_scheduler/jobs`.
    #[instrument(skip(self))]
    pub async fn get_scheduler_jobs(
        &self,
        limit: Option<u64>,
        skip: Option<u64>,
    ) -> Result<DetailedResponse<SchedulerJobsResult>> {
        let req = self
            .request(RequestMethod::Get, "/_scheduler/jobs")?
            .query_opt("limit", limit)
            .query_opt("skip", skip);
        self.send(req, "SchedulerJobsResult").await
    }

    /// Probe a scheduler job: `HEAD /_scheduler/jobs/{job_id}`.
    #[instrument(skip(self))]
    pub async fn head_scheduler_job(&self, job_id: &str) -> Result<DetailedResponse<()>> {
        let job_id = require_path_param("job_id", job_id)?;
        let req = self.request(
            RequestMethod::Head,
            &format!("/_scheduler/jobs/{}", encode_path_segment(job_id)),
        )?;
        self.send_unit(req).await
    }

    /// Retrieve one replication job: `GET /_scheduler/jobs/{job_id}`.
    #[instrument(skip(self))]
    pub async fn get_scheduler_job(&self, job_id: &str) -> Result<DetailedResponse<SchedulerJob>> {
        let job_id = require_path_param("job_id", job_id)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/_scheduler/jobs/{}", encode_path_segment(job_id)),
        )?;
        self.send(req, "SchedulerJob").await
    }
}

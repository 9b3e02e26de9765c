//! Partitioned-database operations. Each one scopes an existing query
//! shape to a single partition key.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::database::PartitionInformation;
use crate::error::Result;
use crate::query::{AllDocsQuery, AllDocsResult, ExplainResult, FindQuery, FindResult};
use crate::search::{SearchQuery, SearchResult};
use crate::view::{ViewQuery, ViewResult};

fn partition_path(db: &str, partition_key: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let partition_key = require_path_param("partition_key", partition_key)?;
    Ok(format!(
        "/{}/_partition/{}",
        encode_path_segment(db),
        encode_path_segment(partition_key)
    ))
}

impl super::CloudantClient {
    fn build_partition_find(
        &self,
        db: &str,
        partition_key: &str,
        query: &FindQuery,
    ) -> Result<RequestBuilder> {
        self.request(
            RequestMethod::Post,
            &format!("{}/_find", partition_path(db, partition_key)?),
        )?
        .json(query)
    }

    /// Retrieve partition metadata: `GET /{db}/_partition/{partition_key}`.
    #[instrument(skip(self))]
    pub async fn get_partition_information(
        &self,
        db: &str,
        partition_key: &str,
    ) -> Result<DetailedResponse<PartitionInformation>> {
        let req = self.request(RequestMethod::Get, &partition_path(db, partition_key)?)?;
        self.send(req, "PartitionInformation").await
    }

    /// Query the primary index within a partition:
    /// `POST /{db}/_partition/{partition_key}/_all_docs`.
    #[instrument(skip(self, query))]
    pub async fn post_partition_all_docs(
        &self,
        db: &str,
        partition_key: &str,
        query: &AllDocsQuery,
    ) -> Result<DetailedResponse<AllDocsResult>> {
        let req = self
            .request(
                RequestMethod::Post,
                &format!("{}/_all_docs", partition_path(db, partition_key)?),
            )?
            .json(query)?;
        self.send(req, "AllDocsResult").await
    }

    /// Partition `_all_docs`, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_partition_all_docs_as_stream(
        &self,
        db: &str,
        partition_key: &str,
        query: &AllDocsQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .request(
                RequestMethod::Post,
                &format!("{}/_all_docs", partition_path(db, partition_key)?),
            )?
            .json(query)?;
        self.send_stream(req).await
    }

    /// Query a search index within a partition:
    /// `POST /{db}/_partition/{partition_key}/_design/{ddoc}/_search/{index}`.
    #[instrument(skip(self, query))]
    pub async fn post_partition_search(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<DetailedResponse<SearchResult>> {
        let req = self.build_partition_search(db, partition_key, ddoc, index, query)?;
        self.send(req, "SearchResult").await
    }

    /// Partition search, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_partition_search_as_stream(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_partition_search(db, partition_key, ddoc, index, query)?;
        self.send_stream(req).await
    }

    fn build_partition_search(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<RequestBuilder> {
        let ddoc = require_path_param("ddoc", ddoc)?;
        let index = require_path_param("index", index)?;
        self.request(
            RequestMethod::Post,
            &format!(
                "{}/_design/{}/_search/{}",
                partition_path(db, partition_key)?,
                encode_path_segment(ddoc),
                encode_path_segment(index)
            ),
        )?
        .json(query)
    }

    /// Query a view within a partition:
    /// `POST /{db}/_partition/{partition_key}/_design/{ddoc}/_view/{view}`.
    #[instrument(skip(self, query))]
    pub async fn post_partition_view(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<DetailedResponse<ViewResult>> {
        let req = self.build_partition_view(db, partition_key, ddoc, view, query)?;
        self.send(req, "ViewResult").await
    }

    /// Partition view, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_partition_view_as_stream(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_partition_view(db, partition_key, ddoc, view, query)?;
        self.send_stream(req).await
    }

    fn build_partition_view(
        &self,
        db: &str,
        partition_key: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<RequestBuilder> {
        let ddoc = require_path_param("ddoc", ddoc)?;
        let view = require_path_param("view", view)?;
        self.request(
            RequestMethod::Post,
            &format!(
                "{}/_design/{}/_view/{}",
                partition_path(db, partition_key)?,
                encode_path_segment(ddoc),
                encode_path_segment(view)
            ),
        )?
        .json(query)
    }

    /// Explain a selector query within a partition:
    /// `POST /{db}/_partition/{partition_key}/_explain`.
    #[instrument(skip(self, query))]
    pub async fn post_partition_explain(
        &self,
        db: &str,
        partition_key: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<ExplainResult>> {
        let req = self
            .request(
                RequestMethod::Post,
                &format!("{}/_explain", partition_path(db, partition_key)?),
            )?
            .json(query)?;
        self.send(req, "ExplainResult").await
    }

    /// Run a selector query within a partition:
    /// `POST /{db}/_partition/{partition_key}/_find`.
    #[instrument(skip(self, query))]
    pub async fn post_partition_find(
        &self,
        db: &str,
        partition_key: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<FindResult>> {
        let req = self.build_partition_find(db, partition_key, query)?;
        self.send(req, "FindResult").await
    }

    /// Partition `_find`, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_partition_find_as_stream(
        &self,
        db: &str,
        partition_key: &str,
        query: &FindQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_partition_find(db, partition_key, query)?;
        self.send_stream(req).await
    }
}

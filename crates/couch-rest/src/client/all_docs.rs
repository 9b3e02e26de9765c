//! `_all_docs` operations, parsed and streaming.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::error::Result;
use crate::query::{AllDocsQueriesResult, AllDocsQuery, AllDocsResult};

impl super::CloudantClient {
    fn build_all_docs(&self, db: &str, query: &AllDocsQuery) -> Result<RequestBuilder> {
        let db = require_path_param("db", db)?;
        self.request(
            RequestMethod::Post,
            &format!("/{}/_all_docs", encode_path_segment(db)),
        )?
        .json(query)
    }

    fn build_all_docs_queries(
        &self,
        db: &str,
        queries: &[AllDocsQuery],
    ) -> Result<RequestBuilder> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_all_docs/queries", encode_path_segment(db)),
            )?
            .json_value(serde_json::json!({ "queries": queries }));
        Ok(req)
    }

    /// Query the primary index: `POST /{db}/_all_docs`.
    #[instrument(skip(self, query))]
    pub async fn post_all_docs(
        &self,
        db: &str,
        query: &AllDocsQuery,
    ) -> Result<DetailedResponse<AllDocsResult>> {
        let req = self.build_all_docs(db, query)?;
        self.send(req, "AllDocsResult").await
    }

    /// Query the primary index, body unread: `POST /{db}/_all_docs`.
    #[instrument(skip(self, query))]
    pub async fn post_all_docs_as_stream(
        &self,
        db: &str,
        query: &AllDocsQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_all_docs(db, query)?;
        self.send_stream(req).await
    }

    /// Run several primary-index queries in one request:
    /// `POST /{db}/_all_docs/queries`.
    #[instrument(skip(self, queries))]
    pub async fn post_all_docs_queries(
        &self,
        db: &str,
        queries: &[AllDocsQuery],
    ) -> Result<DetailedResponse<AllDocsQueriesResult>> {
        let req = self.build_all_docs_queries(db, queries)?;
        self.send(req, "AllDocsQueriesResult").await
    }

    /// Multi-query variant with the body unread.
    #[instrument(skip(self, queries))]
    pub async fn post_all_docs_queries_as_stream(
        &self,
        db: &str,
        queries: &[AllDocsQuery],
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_all_docs_queries(db, queries)?;
        self.send_stream(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CloudantClient;
    use super::*;
    use wharf_couch_auth::NoAuthAuthenticator;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> CloudantClient {
        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();
        client
    }

    #[tokio::test]
    async fn test_post_all_docs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_all_docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_rows": 1,
                "rows": [{"id": "a", "key": "a", "value": {"rev": "1-x"}}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let query = AllDocsQuery {
            include_docs: Some(true),
            ..AllDocsQuery::default()
        };
        let response = client.post_all_docs("events", &query).await.unwrap();
        assert_eq!(response.result.total_rows, 1);
    }

    #[tokio::test]
    async fn test_post_all_docs_queries_wraps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_all_docs/queries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"total_rows": 3, "rows": []},
                    {"total_rows": 3, "rows": []}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let queries = vec![
            AllDocsQuery {
                limit: Some(1),
                ..AllDocsQuery::default()
            },
            AllDocsQuery::default(),
        ];
        let response = client
            .post_all_docs_queries("events", &queries)
            .await
            .unwrap();
        assert_eq!(response.result.results.len(), 2);
    }

    #[tokio::test]
    async fn test_post_all_docs_as_stream_leaves_body_unread() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_all_docs"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"total_rows":0,"rows":[]}"#,
                "application/json",
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_all_docs_as_stream("events", &AllDocsQuery::default())
            .await
            .unwrap();

        let bytes = response.result.collect_bytes().await.unwrap();
        assert_eq!(&bytes[..], br#"{"total_rows":0,"rows":[]}"#);
    }
}

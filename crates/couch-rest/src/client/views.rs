//! MapReduce view operations, parsed and streaming.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::error::Result;
use crate::view::{ViewQueriesResult, ViewQuery, ViewResult};

fn view_path(db: &str, ddoc: &str, view: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let ddoc = require_path_param("ddoc", ddoc)?;
    let view = require_path_param("view", view)?;
    Ok(format!(
        "/{}/_design/{}/_view/{}",
        encode_path_segment(db),
        encode_path_segment(ddoc),
        encode_path_segment(view)
    ))
}

impl super::CloudantClient {
    fn build_view(
        &self,
        db: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<RequestBuilder> {
        self.request(RequestMethod::Post, &view_path(db, ddoc, view)?)?
            .json(query)
    }

    /// Query a view: `POST /{db}/_design/{ddoc}/_view/{view}`.
    #[instrument(skip(self, query))]
    pub async fn post_view(
        &self,
        db: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<DetailedResponse<ViewResult>> {
        let req = self.build_view(db, ddoc, view, query)?;
        self.send(req, "ViewResult").await
    }

    /// Query a view, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_view_as_stream(
        &self,
        db: &str,
        ddoc: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_view(db, ddoc, view, query)?;
        self.send_stream(req).await
    }

    /// Run several view queries in one request:
    /// `POST /{db}/_design/{ddoc}/_view/{view}/queries`.
    #[instrument(skip(self, queries))]
    pub async fn post_view_queries(
        &self,
        db: &str,
        ddoc: &str,
        view: &str,
        queries: &[ViewQuery],
    ) -> Result<DetailedResponse<ViewQueriesResult>> {
        let req = self
            .request(
                RequestMethod::Post,
                &format!("{}/queries", view_path(db, ddoc, view)?),
            )?
            .json_value(serde_json::json!({ "queries": queries }));
        self.send(req, "ViewQueriesResult").await
    }

    /// Multi-query view variant with the body unread.
    #[instrument(skip(self, queries))]
    pub async fn post_view_queries_as_stream(
        &self,
        db: &str,
        ddoc: &str,
        view: &str,
        queries: &[ViewQuery],
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self
            .request(
                RequestMethod::Post,
                &format!("{}/queries", view_path(db, ddoc, view)?),
            )?
            .json_value(serde_json::json!({ "queries": queries }));
        self.send_stream(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CloudantClient;
    use super::*;
    use wharf_couch_auth::NoAuthAuthenticator;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> CloudantClient {
        let mut client = CloudantClient::with_config(
            NoAuthAuthenticator,
            wharf_couch_client::ClientConfig::builder()
                .with_gzip_requests(false)
                .build(),
        )
        .unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();
        client
    }

    #[tokio::test]
    async fn test_post_view_with_json_keys() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_design/demo/_view/by_name"))
            .and(body_json(serde_json::json!({
                "start_key": ["a"],
                "reduce": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_rows": 1,
                "rows": [{"id": "a", "key": ["a"], "value": 1}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let query = ViewQuery {
            start_key: Some(serde_json::json!(["a"])),
            reduce: Some(false),
            ..ViewQuery::default()
        };
        let response = client
            .post_view("events", "demo", "by_name", &query)
            .await
            .unwrap();
        assert_eq!(response.result.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_post_view_queries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_design/demo/_view/by_name/queries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"rows": []}, {"rows": [{"key": null, "value": 7}]}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let queries = vec![ViewQuery::default(), ViewQuery::default()];
        let response = client
            .post_view_queries("events", "demo", "by_name", &queries)
            .await
            .unwrap();
        assert_eq!(response.result.results[1].rows[0].value, serde_json::json!(7));
    }

    #[tokio::test]
    async fn test_missing_view_name_rejected() {
        let client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        let err = client
            .post_view("events", "demo", "", &ViewQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("view"));
    }
}

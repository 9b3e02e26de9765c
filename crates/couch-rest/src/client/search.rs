//! Search index operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::enums::AnalyzerName;
use crate::error::Result;
use crate::search::{
    SearchAnalyzeResult, SearchDiskSizeInformation, SearchInfoResult, SearchQuery, SearchResult,
};

fn search_path(db: &str, ddoc: &str, index: &str) -> Result<String> {
    let db = require_path_param("db", db)?;
    let ddoc = require_path_param("ddoc", ddoc)?;
    let index = require_path_param("index", index)?;
    Ok(format!(
        "/{}/_design/{}/_search/{}",
        encode_path_segment(db),
        encode_path_segment(ddoc),
        encode_path_segment(index)
    ))
}

impl super::CloudantClient {
    fn build_search(
        &self,
        db: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<RequestBuilder> {
        self.request(RequestMethod::Post, &search_path(db, ddoc, index)?)?
            .json(query)
    }

    /// Query a search index:
    /// `POST /{db}/_design/{ddoc}/_search/{index}`.
    #[instrument(skip(self, query))]
    pub async fn post_search(
        &self,
        db: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<DetailedResponse<SearchResult>> {
        let req = self.build_search(db, ddoc, index, query)?;
        self.send(req, "SearchResult").await
    }

    /// Query a search index, body unread.
    #[instrument(skip(self, query))]
    pub async fn post_search_as_stream(
        &self,
        db: &str,
        ddoc: &str,
        index: &str,
        query: &SearchQuery,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_search(db, ddoc, index, query)?;
        self.send_stream(req).await
    }

    /// Tokenize sample text with a named analyzer: `POST /_search_analyze`.
    #[instrument(skip(self, text))]
    pub async fn post_search_analyze(
        &self,
        analyzer: &AnalyzerName,
        text: &str,
    ) -> Result<DetailedResponse<SearchAnalyzeResult>> {
        let req = self
            .request(RequestMethod::Post, "/_search_analyze")?
            .json_value(serde_json::json!({
                "analyzer": analyzer,
                "text": text
            }));
        self.send(req, "SearchAnalyzeResult").await
    }

    /// Retrieve search index metadata:
    /// `GET /{db}/_design/{ddoc}/_search_info/{index}`.
    #[instrument(skip(self))]
    pub async fn get_search_info(
        &self,
        db: &str,
        ddoc: &str,
        index: &str,
    ) -> Result<DetailedResponse<SearchInfoResult>> {
        let db = require_path_param("db", db)?;
        let ddoc = require_path_param("ddoc", ddoc)?;
        let index = require_path_param("index", index)?;
        let req = self.request(
            RequestMethod::Get,
            &format!(
                "/{}/_design/{}/_search_info/{}",
                encode_path_segment(db),
                encode_path_segment(ddoc),
                encode_path_segment(index)
            ),
        )?;
        self.send(req, "SearchInfoResult").await
    }

    /// Retrieve search index disk size:
    /// `GET /{db}/_design/{ddoc}/_search_disk_size/{index}`.
    #[instrument(skip(self))]
    pub async fn get_search_disk_size(
        &self,
        db: &str,
        ddoc: &str,
        index: &str,
    ) -> Result<DetailedResponse<SearchDiskSizeInformation>> {
        let db = require_path_param("db", db)?;
        let ddoc = require_path_param("ddoc", ddoc)?;
        let index = require_path_param("index", index)?;
        let req = self.request(
            RequestMethod::Get,
            &format!(
                "/{}/_design/{}/_search_disk_size/{}",
                encode_path_segment(db),
                encode_path_segment(ddoc),
                encode_path_segment(index)
            ),
        )?;
        self.send(req, "SearchDiskSizeInformation").await
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
    async fn test_post_search() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_design/demo/_search/titles"))
            .and(body_json(serde_json::json!({"query": "title:cat"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_rows": 1,
                "bookmark": "g2wAAA",
                "rows": [{"id": "a", "fields": {"title": "cat"}}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_search("events", "demo", "titles", &SearchQuery::new("title:cat"))
            .await
            .unwrap();
        assert_eq!(response.result.total_rows, 1);
    }

    #[tokio::test]
    async fn test_post_search_analyze() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_search_analyze"))
            .and(body_json(serde_json::json!({
                "analyzer": "english",
                "text": "running quickly"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tokens": ["run", "quickli"]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_search_analyze(&AnalyzerName::ENGLISH, "running quickly")
            .await
            .unwrap();
        assert_eq!(response.result.tokens[0], "run");
    }

    #[tokio::test]
    async fn test_get_search_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events/_design/demo/_search_info/titles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "titles",
                "search_index": {
                    "pending_seq": 0,
                    "committed_seq": 10,
                    "disk_size": 2048,
                    "doc_count": 5,
                    "doc_del_count": 0,
                    "signature": "sig"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .get_search_info("events", "demo", "titles")
            .await
            .unwrap();
        assert_eq!(response.result.search_index.disk_size, 2048);
    }

    #[tokio::test]
    async fn test_missing_index_rejected() {
        let client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        let err = client
            .get_search_disk_size("events", "demo", "")
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}

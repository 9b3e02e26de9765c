//! Revision-difference and shard-topology operations.

use std::collections::HashMap;

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::database::{DocumentShardInfo, ShardsInformation};
use crate::document::RevsDiff;
use crate::error::Result;

impl super::CloudantClient {
    /// Determine which revisions the server is missing:
    /// `POST /{db}/_revs_diff`. The body maps document IDs to candidate
    /// revisions; so does the result, to the subset not stored.
    #[instrument(skip(self, document_revisions))]
    pub async fn post_revs_diff(
        &self,
        db: &str,
        document_revisions: &HashMap<String, Vec<String>>,
    ) -> Result<DetailedResponse<HashMap<String, RevsDiff>>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_revs_diff", encode_path_segment(db)),
            )?
            .json(document_revisions)?;
        self.send(req, "Map<String, RevsDiff>").await
    }

    /// Retrieve the database shard map: `GET /{db}/_shards`.
    #[instrument(skip(self))]
    pub async fn get_shards_information(
        &self,
        db: &str,
    ) -> Result<DetailedResponse<ShardsInformation>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/{}/_shards", encode_path_segment(db)),
        )?;
        self.send(req, "ShardsInformation").await
    }

    /// Find the shard holding one document: `GET /{db}/_shards/{doc_id}`.
    #[instrument(skip(self))]
    pub async fn get_document_shards_info(
        &self,
        db: &str,
        doc_id: &str,
    ) -> Result<DetailedResponse<DocumentShardInfo>> {
        let db = require_path_param("db", db)?;
        let doc_id = require_path_param("doc_id", doc_id)?;
        let req = self.request(
            RequestMethod::Get,
            &format!(
                "/{}/_shards/{}",
                encode_path_segment(db),
                encode_path_segment(doc_id)
            ),
        )?;
        self.send(req, "DocumentShardInfo").await
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
    async fn test_post_revs_diff() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_revs_diff"))
            .and(body_json(serde_json::json!({"a": ["2-x", "3-y"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "a": {"missing": ["3-y"], "possible_ancestors": ["2-x"]}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let revisions = HashMap::from([(
            "a".to_string(),
            vec!["2-x".to_string(), "3-y".to_string()],
        )]);
        let response = client.post_revs_diff("events", &revisions).await.unwrap();
        assert_eq!(
            response.result["a"].missing.as_deref(),
            Some(&["3-y".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_get_shards_information() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events/_shards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "shards": {"00000000-7fffffff": ["node1@127.0.0.1", "node2@127.0.0.1"]}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.get_shards_information("events").await.unwrap();
        assert_eq!(response.result.shards["00000000-7fffffff"].len(), 2);
    }

    #[tokio::test]
    async fn test_get_document_shards_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events/_shards/order-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nodes": ["node1@127.0.0.1"],
                "range": "00000000-7fffffff"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .get_document_shards_info("events", "order-1")
            .await
            .unwrap();
        assert_eq!(response.result.range, "00000000-7fffffff");
    }
}

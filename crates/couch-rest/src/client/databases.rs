//! Database lifecycle and metadata operations.

use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::database::{DatabaseInformation, DbsInfoResult};
use crate::error::Result;
use crate::server::Ok as OkResult;

/// Optional parameters for `get_all_dbs`.
#[derive(Debug, Clone, Default)]
pub struct AllDbsOptions {
    /// Reverse the name order.
    pub descending: Option<bool>,
    /// Stop at this database name.
    pub end_key: Option<String>,
    /// Maximum names returned.
    pub limit: Option<i64>,
    /// Names skipped before the first returned.
    pub skip: Option<i64>,
    /// Start at this database name.
    pub start_key: Option<String>,
}

impl super::CloudantClient {
    /// Probe for database existence: `HEAD /{db}`.
    #[instrument(skip(self))]
    pub async fn head_database(&self, db: &str) -> Result<DetailedResponse<()>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Head,
            &format!("/{}", encode_path_segment(db)),
        )?;
        self.send_unit(req).await
    }

    /// Create a database: `PUT /{db}`.
    #[instrument(skip(self))]
    pub async fn put_database(
        &self,
        db: &str,
        partitioned: Option<bool>,
        q: Option<i64>,
    ) -> Result<DetailedResponse<OkResult>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(RequestMethod::Put, &format!("/{}", encode_path_segment(db)))?
            .query_opt("partitioned", partitioned)
            .query_opt("q", q);
        self.send(req, "Ok").await
    }

    /// Delete a database: `DELETE /{db}`.
    #[instrument(skip(self))]
    pub async fn delete_database(&self, db: &str) -> Result<DetailedResponse<OkResult>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Delete,
            &format!("/{}", encode_path_segment(db)),
        )?;
        self.send(req, "Ok").await
    }

    /// Retrieve database metadata: `GET /{db}`.
    #[instrument(skip(self))]
    pub async fn get_database_information(
        &self,
        db: &str,
    ) -> Result<DetailedResponse<DatabaseInformation>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/{}", encode_path_segment(db)),
        )?;
        self.send(req, "DatabaseInformation").await
    }

    /// List database names: `GET /_all_dbs`.
    #[instrument(skip(self, options))]
    pub async fn get_all_dbs(
        &self,
        options: &AllDbsOptions,
    ) -> Result<DetailedResponse<Vec<String>>> {
        let req = self
            .request(RequestMethod::Get, "/_all_dbs")?
            .query_opt("descending", options.descending)
            .query_opt("end_key", options.end_key.clone())
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .query_opt("start_key", options.start_key.clone());
        self.send(req, "Vec<String>").await
    }

    /// Retrieve metadata for several databases at once: `POST /_dbs_info`.
    #[instrument(skip(self, keys))]
    pub async fn post_dbs_info(
        &self,
        keys: &[String],
    ) -> Result<DetailedResponse<Vec<DbsInfoResult>>> {
        let req = self
            .request(RequestMethod::Post, "/_dbs_info")?
            .json_value(serde_json::json!({ "keys": keys }));
        self.send(req, "Vec<DbsInfoResult>").await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CloudantClient;
    use super::AllDbsOptions;
    use wharf_couch_auth::NoAuthAuthenticator;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> CloudantClient {
        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();
        client
    }

    #[tokio::test]
    async fn test_head_database_exposes_status_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.head_database("events").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.result, ());
    }

    #[tokio::test]
    async fn test_put_database_partitioned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/events"))
            .and(query_param("partitioned", "true"))
            .and(query_param("q", "4"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "ok": true
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .put_database("events", Some(true), Some(4))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.result.ok, Some(true));
    }

    #[tokio::test]
    async fn test_empty_db_name_rejected_without_network() {
        let client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        // The placeholder URL is still in place; InvalidInput must win
        // because validation happens before URL assembly.
        let err = client.delete_database("").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("db"));
    }

    #[tokio::test]
    async fn test_get_all_dbs_without_options_has_no_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_all_dbs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!(["_replicator", "events"])),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.get_all_dbs(&AllDbsOptions::default()).await.unwrap();
        assert_eq!(response.result, vec!["_replicator", "events"]);

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_post_dbs_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_dbs_info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"key": "missing", "error": "not_found"}
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_dbs_info(&["missing".to_string()])
            .await
            .unwrap();
        assert_eq!(response.result[0].key, "missing");
    }

    #[tokio::test]
    async fn test_database_name_is_path_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/some%2Fdb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cluster": {"n": 1, "q": 1, "r": 1, "w": 1},
                "compact_running": false,
                "db_name": "some/db",
                "disk_format_version": 8,
                "doc_count": 0,
                "doc_del_count": 0,
                "props": {},
                "sizes": {},
                "update_seq": "0-g1"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.get_database_information("some/db").await.unwrap();
        assert_eq!(response.result.db_name, "some/db");
    }
}

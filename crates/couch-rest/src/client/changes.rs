//! Changes feed operations.

use serde_json::Map;
use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{ByteStream, DetailedResponse, RequestBuilder, RequestMethod};

use crate::changes::{ChangesResult, DbUpdates};
use crate::enums::{Feed, Style};
use crate::error::Result;

/// Optional parameters for `post_changes`. The filter-shaped fields
/// (`doc_ids`, `fields`, `selector`) travel in the request body; everything
/// else renders as query parameters.
#[derive(Debug, Clone, Default)]
pub struct ChangesOptions {
    /// Restrict the feed to these document IDs (`_doc_ids` filter).
    pub doc_ids: Option<Vec<String>>,
    /// Project each returned document to these fields.
    pub fields: Option<Vec<String>>,
    /// Restrict the feed with a selector (`_selector` filter).
    pub selector: Option<Map<String, serde_json::Value>>,
    /// Value for the `Last-Event-ID` header, an alternative to `since`.
    pub last_event_id: Option<String>,
    /// Include attachment encoding information.
    pub att_encoding_info: Option<bool>,
    /// Include attachment bodies.
    pub attachments: Option<bool>,
    /// Include conflict revisions.
    pub conflicts: Option<bool>,
    /// Return results in descending sequence order.
    pub descending: Option<bool>,
    /// Feed mode (`normal`, `longpoll`, ...).
    pub feed: Option<Feed>,
    /// Name of a filter function, `design/filter`.
    pub filter: Option<String>,
    /// Heartbeat period in milliseconds for continuous feeds.
    pub heartbeat: Option<u64>,
    /// Include the full document with each result.
    pub include_docs: Option<bool>,
    /// Maximum number of results.
    pub limit: Option<u64>,
    /// How often to emit sequence identifiers.
    pub seq_interval: Option<u64>,
    /// Start the feed after this sequence identifier.
    pub since: Option<String>,
    /// Revision style (`main_only` or `all_docs`).
    pub style: Option<Style>,
    /// Maximum wait in milliseconds before an empty response.
    pub timeout: Option<u64>,
    /// Restrict the feed to documents in a view (`_view` filter).
    pub view: Option<String>,
}

impl super::CloudantClient {
    fn build_changes(&self, db: &str, options: &ChangesOptions) -> Result<RequestBuilder> {
        let db = require_path_param("db", db)?;

        let mut body = Map::new();
        if let Some(doc_ids) = &options.doc_ids {
            body.insert("doc_ids".to_string(), serde_json::json!(doc_ids));
        }
        if let Some(fields) = &options.fields {
            body.insert("fields".to_string(), serde_json::json!(fields));
        }
        if let Some(selector) = &options.selector {
            body.insert("selector".to_string(), serde_json::json!(selector));
        }

        let mut req = self
            .request(
                RequestMethod::Post,
                &format!("/{}/_changes", encode_path_segment(db)),
            )?
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("attachments", options.attachments)
            .query_opt("conflicts", options.conflicts)
            .query_opt("descending", options.descending)
            .query_opt("feed", options.feed.as_ref().map(|f| f.as_str().to_string()))
            .query_opt("filter", options.filter.clone())
            .query_opt("heartbeat", options.heartbeat)
            .query_opt("include_docs", options.include_docs)
            .query_opt("limit", options.limit)
            .query_opt("seq_interval", options.seq_interval)
            .query_opt("since", options.since.clone())
            .query_opt("style", options.style.as_ref().map(|s| s.as_str().to_string()))
            .query_opt("timeout", options.timeout)
            .query_opt("view", options.view.clone())
            .json_value(serde_json::Value::Object(body));
        if let Some(id) = &options.last_event_id {
            req = req.header("Last-Event-ID", id.clone());
        }
        Ok(req)
    }

    /// Query the database changes feed: `POST /{db}/_changes`.
    #[instrument(skip(self, options))]
    pub async fn post_changes(
        &self,
        db: &str,
        options: &ChangesOptions,
    ) -> Result<DetailedResponse<ChangesResult>> {
        let req = self.build_changes(db, options)?;
        self.send(req, "ChangesResult").await
    }

    /// Query the changes feed with the body unread, for continuous feeds or
    /// line-delimited consumption.
    #[instrument(skip(self, options))]
    pub async fn post_changes_as_stream(
        &self,
        db: &str,
        options: &ChangesOptions,
    ) -> Result<DetailedResponse<ByteStream>> {
        let req = self.build_changes(db, options)?;
        self.send_stream(req).await
    }

    /// List recent database-level events: `GET /_db_updates`.
    ///
    /// This endpoint is deprecated and scheduled for removal; a warning is
    /// logged on every call.
    #[instrument(skip(self))]
    pub async fn get_db_updates(
        &self,
        descending: Option<bool>,
        feed: Option<&Feed>,
        heartbeat: Option<u64>,
        limit: Option<u64>,
        since: Option<&str>,
        timeout: Option<u64>,
    ) -> Result<DetailedResponse<DbUpdates>> {
        tracing::warn!("get_db_updates is deprecated and will be removed in a future release");
        let req = self
            .request(RequestMethod::Get, "/_db_updates")?
            .query_opt("descending", descending)
            .query_opt("feed", feed.map(|f| f.as_str().to_string()))
            .query_opt("heartbeat", heartbeat)
            .query_opt("limit", limit)
            .query_opt("since", since.map(str::to_string))
            .query_opt("timeout", timeout);
        self.send(req, "DbUpdates").await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CloudantClient;
    use super::*;
    use wharf_couch_auth::NoAuthAuthenticator;
    use wiremock::matchers::{body_json, header, method, path, query_param};
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
    async fn test_post_changes_sends_empty_body_when_unset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_changes"))
            .and(body_json(serde_json::json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "last_seq": "5-g1AAAA",
                "pending": 0,
                "results": [{"changes": [{"rev": "2-x"}], "id": "a", "seq": "5-g1AAAA"}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_changes("events", &ChangesOptions::default())
            .await
            .unwrap();
        assert_eq!(response.result.results.len(), 1);

        // No optional query parameters means no query string at all.
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_post_changes_body_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/_changes"))
            .and(query_param("include_docs", "true"))
            .and(query_param("since", "0"))
            .and(header("Last-Event-ID", "9-abc"))
            .and(body_json(serde_json::json!({"doc_ids": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "last_seq": "9-g1AAAA",
                "pending": 0,
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let options = ChangesOptions {
            doc_ids: Some(vec!["a".to_string(), "b".to_string()]),
            include_docs: Some(true),
            since: Some("0".to_string()),
            last_event_id: Some("9-abc".to_string()),
            ..ChangesOptions::default()
        };
        let response = client.post_changes("events", &options).await.unwrap();
        assert_eq!(response.result.last_seq, "9-g1AAAA");
    }

    #[tokio::test]
    async fn test_post_changes_as_stream_leaves_body_unread() {
        let mock_server = MockServer::start().await;

        let body = "{\"results\":[],\"last_seq\":\"0\",\"pending\":0}";
        Mock::given(method("POST"))
            .and(path("/events/_changes"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .post_changes_as_stream("events", &ChangesOptions::default())
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let collected = response.result.collect_bytes().await.unwrap();
        assert_eq!(&collected[..], body.as_bytes());
    }

    #[tokio::test]
    async fn test_get_db_updates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_db_updates"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "last_seq": "3-g1AAAA",
                "results": [{"db_name": "events", "seq": "1-g1AAAA", "type": "created"}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .get_db_updates(None, None, None, Some(10), None, None)
            .await
            .unwrap();
        assert_eq!(
            response.result.results[0].kind,
            crate::enums::DbEventType::CREATED
        );
    }
}

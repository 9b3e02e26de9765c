//! CouchDB/Cloudant API client.
//!
//! This façade wraps `CouchHttpClient` from `wharf-couch-client` and exposes
//! one typed method per remote endpoint and response-shape variant. Each
//! call validates its inputs, composes the request, applies client-level
//! defaults and the authenticator, and dispatches to the transport.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use wharf_couch_auth::{authenticator_from_env, service_url_from_env, Authenticator};
use wharf_couch_client::{
    ByteStream, ClientConfig, CouchHttpClient, CouchResponse, DetailedResponse, Error,
    RequestBuilder, RequestMethod,
};

use crate::error::Result;

mod all_docs;
mod attachments;
mod bulk;
mod changes;
mod databases;
mod design;
mod documents;
mod local;
mod misc;
mod monitoring;
mod partitions;
mod queries;
mod replication;
mod search;
mod security;
mod server;

pub use bulk::*;
pub use changes::*;
pub use databases::*;
pub use documents::*;
pub use queries::*;

/// Default service URL template. The placeholder must be replaced (via
/// [`CloudantClient::set_service_url`] or environment configuration) before
/// any call; the client rejects it with `InvalidConfiguration`.
pub const DEFAULT_SERVICE_URL: &str =
    "https://~replace-with-cloudant-host~.cloudantnosqldb.appdomain.cloud";

const PLACEHOLDER: &str = "~replace-with-cloudant-host~";

/// CouchDB/Cloudant API client.
///
/// Construction wires together a base URL, an authenticator, and the HTTP
/// engine. After construction the configuration is immutable; the client is
/// cheap to clone and safe to share across concurrent callers.
///
/// # Example
///
/// ```rust,ignore
/// use wharf_couch_auth::BasicAuthenticator;
/// use wharf_couch_rest::CloudantClient;
///
/// let mut client = CloudantClient::new(BasicAuthenticator::new("admin", "pass"))?;
/// client.set_service_url("https://couch.example.com")?;
///
/// let info = client.get_database_information("orders").await?;
/// println!("{} docs", info.result.doc_count);
/// ```
#[derive(Debug, Clone)]
pub struct CloudantClient {
    http: CouchHttpClient,
    authenticator: Arc<dyn Authenticator>,
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl CloudantClient {
    /// Create a client with the given authenticator and default HTTP
    /// configuration. The service URL starts at [`DEFAULT_SERVICE_URL`] and
    /// must be replaced before use.
    pub fn new(authenticator: impl Authenticator + 'static) -> Result<Self> {
        Self::with_config(authenticator, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        authenticator: impl Authenticator + 'static,
        config: ClientConfig,
    ) -> Result<Self> {
        authenticator.validate().map_err(Error::from)?;
        Ok(Self {
            http: CouchHttpClient::new(config)?,
            authenticator: Arc::new(authenticator),
            base_url: DEFAULT_SERVICE_URL.to_string(),
            default_headers: HashMap::new(),
        })
    }

    /// Create a client from a shared authenticator.
    pub fn from_shared(
        authenticator: Arc<dyn Authenticator>,
        config: ClientConfig,
    ) -> Result<Self> {
        authenticator.validate().map_err(Error::from)?;
        Ok(Self {
            http: CouchHttpClient::new(config)?,
            authenticator,
            base_url: DEFAULT_SERVICE_URL.to_string(),
            default_headers: HashMap::new(),
        })
    }

    /// Create a client configured from the environment for a named service:
    /// `{NAME}_URL`, `{NAME}_AUTH_TYPE`, and the matching credentials.
    pub fn new_instance(service_name: &str) -> Result<Self> {
        let authenticator = authenticator_from_env(service_name).map_err(Error::from)?;
        let url = service_url_from_env(service_name).map_err(Error::from)?;
        let mut client = Self::from_shared(authenticator, ClientConfig::default())?;
        client.set_service_url(&url)?;
        Ok(client)
    }

    /// Replace the service URL. Trailing slashes are stripped; the URL must
    /// be absolute.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::invalid_configuration(format!("invalid service URL: {e}")))?;
        if !parsed.has_host() {
            return Err(Error::invalid_configuration(format!(
                "service URL has no host: {url}"
            )));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// The configured service URL.
    pub fn service_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the default headers sent with every request. These layer
    /// over SDK and operation headers, so a caller-supplied header with the
    /// same name wins.
    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.default_headers = headers;
    }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> &CouchHttpClient {
        &self.http
    }

    /// Build an absolute URL for a path under the service URL, rejecting
    /// the unreplaced placeholder.
    pub(crate) fn url(&self, path: &str) -> Result<String> {
        if self.base_url.contains(PLACEHOLDER) {
            return Err(Error::invalid_configuration(
                "service URL still contains the `~replace-with-cloudant-host~` placeholder; \
                 call set_service_url or configure {NAME}_URL",
            ));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    /// Start a request for a path under the service URL with the SDK
    /// default `Accept`.
    pub(crate) fn request(&self, method: RequestMethod, path: &str) -> Result<RequestBuilder> {
        Ok(RequestBuilder::new(method, self.url(path)?).accept("application/json"))
    }

    /// Apply client default headers and the authenticator, then execute.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<CouchResponse> {
        let mut request = request.headers(self.default_headers.clone());
        self.authenticator
            .authenticate(&mut request)
            .map_err(Error::from)?;
        self.http.execute(request).await
    }

    /// Execute and eagerly parse the body against a result schema.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        schema: &'static str,
    ) -> Result<DetailedResponse<T>> {
        let response = self.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let result = response.json::<T>(schema).await?;
        Ok(DetailedResponse {
            status,
            headers,
            result,
        })
    }

    /// Execute and hand the body back unread as a lazy byte stream.
    pub(crate) async fn send_stream(
        &self,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<ByteStream>> {
        let response = self.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        Ok(DetailedResponse {
            status,
            headers,
            result: response.into_stream(),
        })
    }

    /// Execute a result-less request (HEAD and friends), draining the body.
    pub(crate) async fn send_unit(
        &self,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<()>> {
        let response = self.execute(request).await?;
        response.finish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wharf_couch_auth::{BasicAuthenticator, NoAuthAuthenticator};
    use wharf_couch_client::ErrorKind;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_placeholder_rejected_before_any_network_work() {
        let client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        let err = client.url("/db").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfiguration(_)));
    }

    #[test]
    fn test_set_service_url_strips_trailing_slash() {
        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        client.set_service_url("https://couch.example.com/").unwrap();
        assert_eq!(client.service_url(), "https://couch.example.com");
        assert_eq!(client.url("/db").unwrap(), "https://couch.example.com/db");
    }

    #[test]
    fn test_set_service_url_rejects_garbage() {
        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        assert!(client.set_service_url("not a url").is_err());
    }

    #[test]
    fn test_invalid_basic_credentials_rejected_at_construction() {
        let err = CloudantClient::new(BasicAuthenticator::new("user:colon", "p")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_default_headers_override_operation_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("Accept", "application/testing+json"))
            .and(header("X-Trace", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "couchdb": "Welcome",
                "features": [],
                "vendor": {"name": "x"},
                "version": "3.0.0"
            })))
            .mount(&mock_server)
            .await;

        let mut client = CloudantClient::new(NoAuthAuthenticator).unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();
        client.set_default_headers(HashMap::from([
            ("Accept".to_string(), "application/testing+json".to_string()),
            ("X-Trace".to_string(), "abc".to_string()),
        ]));

        let response = client.get_server_information().await.unwrap();
        assert_eq!(response.result.version, "3.0.0");
    }

    #[tokio::test]
    async fn test_authenticator_applied_last() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("Authorization", "Basic YWRtaW46cGFzcw=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "couchdb": "Welcome",
                "features": [],
                "vendor": {"name": "x"},
                "version": "3.0.0"
            })))
            .mount(&mock_server)
            .await;

        let mut client =
            CloudantClient::new(BasicAuthenticator::new("admin", "pass")).unwrap();
        client.set_service_url(&mock_server.uri()).unwrap();

        let response = client.get_server_information().await.unwrap();
        assert_eq!(response.status, 200);
    }
}

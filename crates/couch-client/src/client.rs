//! Core HTTP client: builds the pooled transport, executes prepared
//! requests, and maps failures into the SDK error taxonomy.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::{api_error, CouchResponse};

/// HTTP client for the CouchDB/Cloudant API.
///
/// Wraps a pooled `reqwest::Client`. Cloning is cheap and shares the pool;
/// a single instance is safe to use from many concurrent callers.
#[derive(Debug, Clone)]
pub struct CouchHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl CouchHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent);

        if config.accept_compressed {
            builder = builder.gzip(true).deflate(true);
        } else {
            builder = builder.gzip(false).deflate(false);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::InvalidConfiguration(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a prepared request, raising `Api` errors for non-2xx
    /// statuses.
    ///
    /// Authentication must already have been applied to the request; this
    /// layer only moves bytes.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<CouchResponse> {
        let response = self.execute_raw(request).await?;

        if response.is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, body))
    }

    /// Execute a prepared request without status checking.
    pub async fn execute_raw(&self, request: RequestBuilder) -> Result<CouchResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        let mut headers = request.headers.clone();

        // Body. JSON bodies are serialized once here; non-empty ones are
        // gzipped when request compression is on. Byte bodies pass through
        // untouched.
        match &request.body {
            Some(RequestBody::Json(value)) => {
                let serialized = serde_json::to_vec(value)?;
                if self.config.gzip_requests && !serialized.is_empty() {
                    let compressed = gzip(&serialized)?;
                    headers.insert("Content-Encoding".to_string(), "gzip".to_string());
                    req = req.body(compressed);
                } else {
                    req = req.body(serialized);
                }
            }
            Some(RequestBody::Bytes(bytes)) => {
                req = req.body(bytes.clone());
            }
            None => {}
        }

        for (name, value) in &headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %request.url, "sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            debug!(status = response.status().as_u16(), "response received");
        }

        Ok(CouchResponse::new(response))
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| Error::with_source(ErrorKind::Json(format!("gzip failed: {e}")), e))
}

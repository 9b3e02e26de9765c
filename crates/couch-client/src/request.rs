//! HTTP request building.
//!
//! A `RequestBuilder` is a plain value describing one HTTP exchange: method,
//! absolute URL, layered headers, ordered query pairs, and an optional body.
//! Authenticators mutate it in place just before it is handed to the
//! transport.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Head => reqwest::Method::HEAD,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request body content.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// A JSON value, serialized once when the request is sent. Subject to
    /// request gzip when enabled.
    Json(serde_json::Value),
    /// Raw bytes passed through unchanged, never compressed.
    Bytes(Bytes),
}

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The request URL (without the query string).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Look up a header already set on this request.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }

    /// Set a header. Setting the same name again replaces the value, which
    /// is what gives "later layer wins" semantics.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a header in place (for `Authenticator` implementations).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Layer a set of headers over the current ones, later wins.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Set the `Accept` header.
    pub fn accept(self, media_type: impl Into<String>) -> Self {
        self.header("Accept", media_type)
    }

    /// Set the `Content-Type` header.
    pub fn content_type(self, media_type: impl Into<String>) -> Self {
        self.header("Content-Type", media_type)
    }

    /// Set `If-Match` (document revision precondition).
    pub fn if_match(self, rev: impl Into<String>) -> Self {
        self.header("If-Match", rev)
    }

    /// Set `If-None-Match`.
    pub fn if_none_match(self, rev: impl Into<String>) -> Self {
        self.header("If-None-Match", rev)
    }

    /// Add a query parameter. Parameters keep their insertion order.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter when the value is set. Booleans render as
    /// `true`/`false`, integers in decimal.
    pub fn query_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(name, v.to_string()),
            None => self,
        }
    }

    /// Add a string-list query parameter as a single comma-separated value,
    /// when the list is set.
    pub fn query_csv_opt<S: AsRef<str>>(self, name: &str, values: Option<&[S]>) -> Self {
        match values {
            Some(v) => self.query(name, crate::encode::join_csv(v)),
            None => self,
        }
    }

    /// Set a JSON body from a serializable model. Does not mutate the
    /// caller's model; the value is serialized into the request.
    ///
    /// Sets `Content-Type: application/json` unless already set.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json".to_string());
        Ok(self)
    }

    /// Set a raw JSON value body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json".to_string());
        self
    }

    /// Set a raw byte body. The caller-supplied content type (set via
    /// `content_type`) is honored; bytes are never compressed.
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// Per-request timeout override.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

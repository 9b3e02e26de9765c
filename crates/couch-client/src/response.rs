//! HTTP response handling.
//!
//! Successful calls produce a [`DetailedResponse`] carrying status, headers,
//! and either a parsed model or a lazy [`ByteStream`]. Non-2xx responses are
//! turned into `Api` errors with the CouchDB error envelope extracted when
//! the body carries one.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// The uniform response envelope: HTTP status, response headers, and the
/// operation result (a parsed model, a [`ByteStream`], or `()` for HEAD).
#[derive(Debug)]
pub struct DetailedResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, verbatim from the transport.
    pub headers: HeaderMap,
    /// The operation result.
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// Get a response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// Wrapper around the transport response.
#[derive(Debug)]
pub struct CouchResponse {
    inner: reqwest::Response,
}

impl CouchResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Read the whole body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Read the whole body as bytes.
    pub async fn bytes(self) -> Result<Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Eagerly parse the body as JSON into the given schema.
    ///
    /// A failure names the schema so callers can tell which result type the
    /// body violated.
    pub async fn json<T: DeserializeOwned>(self, schema: &'static str) -> Result<T> {
        let bytes = self.inner.bytes().await.map_err(Error::from)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::with_source(
                ErrorKind::Parse {
                    schema,
                    message: e.to_string(),
                },
                e,
            )
        })
    }

    /// Turn the body into a lazy byte stream without reading it.
    pub fn into_stream(self) -> ByteStream {
        ByteStream {
            inner: self.inner.bytes_stream().boxed(),
        }
    }

    /// Finish a response whose status has already been checked, dropping the
    /// body (HEAD requests and other result-less operations).
    pub async fn finish(self) -> Result<DetailedResponse<()>> {
        let status = self.status();
        let headers = self.inner.headers().clone();
        // Drain so the connection returns to the pool.
        let _ = self.inner.bytes().await;
        Ok(DetailedResponse {
            status,
            headers,
            result: (),
        })
    }
}

/// A finite lazy byte sequence over an open response body.
///
/// The stream owns the underlying connection until it is fully consumed or
/// dropped; dropping it aborts the body transfer and releases the
/// connection. Callers should consume or drop it promptly.
pub struct ByteStream {
    inner: BoxStream<'static, reqwest::Result<Bytes>>,
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}

impl ByteStream {
    /// Pull the next chunk of the body.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        match self.inner.next().await {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Collect the remainder of the stream into one buffer.
    pub async fn collect_bytes(mut self) -> Result<Bytes> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(buf))
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner
            .poll_next_unpin(cx)
            .map(|opt| opt.map(|res| res.map_err(Into::into)))
    }
}

/// CouchDB error envelope: `{"error": "...", "reason": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct CouchErrorEnvelope {
    error: Option<String>,
    reason: Option<String>,
}

/// Build an `Api` error from a non-2xx status and its body.
pub(crate) fn api_error(status: u16, body: String) -> Error {
    let envelope: Option<CouchErrorEnvelope> = serde_json::from_str(&body).ok();
    let (error, reason) = match envelope {
        Some(env) => (env.error, env.reason),
        None => (None, None),
    };

    Error::new(ErrorKind::Api {
        status,
        error,
        reason,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_with_couch_envelope() {
        let err = api_error(
            409,
            r#"{"error":"conflict","reason":"Document update conflict."}"#.to_string(),
        );
        match err.kind {
            ErrorKind::Api {
                status,
                error,
                reason,
                ..
            } => {
                assert_eq!(status, 409);
                assert_eq!(error.as_deref(), Some("conflict"));
                assert_eq!(reason.as_deref(), Some("Document update conflict."));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_with_non_json_body() {
        let err = api_error(502, "<html>bad gateway</html>".to_string());
        match err.kind {
            ErrorKind::Api {
                status,
                error,
                reason,
                body,
            } => {
                assert_eq!(status, 502);
                assert!(error.is_none());
                assert!(reason.is_none());
                assert_eq!(body, "<html>bad gateway</html>");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_with_partial_envelope() {
        let err = api_error(401, r#"{"error":"unauthorized"}"#.to_string());
        match err.kind {
            ErrorKind::Api { error, reason, .. } => {
                assert_eq!(error.as_deref(), Some("unauthorized"));
                assert!(reason.is_none());
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}

//! Error types for wharf-couch-client.

/// Result type alias for couch-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for couch-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for an `InvalidInput` error naming the offending parameter.
    pub fn invalid_input(field: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput {
            field: field.into(),
        })
    }

    /// Shorthand for an `InvalidConfiguration` error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfiguration(message.into()))
    }

    /// Returns true if this error was raised before any network I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidInput { .. })
    }

    /// Returns true if the server replied with a non-2xx status.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns true if the request timed out at the transport layer.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// The HTTP status code, when the server produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Api { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required argument is missing or empty. Raised locally, before any
    /// network work.
    #[error("Invalid input: required parameter '{field}' is missing or empty")]
    InvalidInput {
        /// The offending parameter or field name.
        field: String,
    },

    /// The client is not usable as configured (unreplaced service URL
    /// placeholder, malformed URL, missing authenticator).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The server returned a non-2xx status.
    #[error("API error: {status}{}{}",
        error.as_deref().map(|e| format!(" {e}")).unwrap_or_default(),
        reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied error name (CouchDB `error` field), when present.
        error: Option<String>,
        /// Server-supplied reason (CouchDB `reason` field), when present.
        reason: Option<String>,
        /// The raw response body.
        body: String,
    },

    /// Connection or TLS failure at the transport layer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// The response body could not be parsed against the declared result
    /// schema.
    #[error("Failed to parse response as {schema}: {message}")]
    Parse {
        /// The schema the body was parsed against.
        schema: &'static str,
        /// The underlying deserialization failure.
        message: String,
    },

    /// Local JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Transport(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(
            ErrorKind::InvalidConfiguration(format!("Invalid URL: {}", err)),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("db");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: required parameter 'db' is missing or empty"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::new(ErrorKind::Api {
            status: 404,
            error: Some("not_found".to_string()),
            reason: Some("missing".to_string()),
            body: r#"{"error":"not_found","reason":"missing"}"#.to_string(),
        });

        assert!(err.is_api_error());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "API error: 404 not_found: missing");
    }

    #[test]
    fn test_api_error_display_without_envelope() {
        let err = Error::new(ErrorKind::Api {
            status: 502,
            error: None,
            reason: None,
            body: "bad gateway".to_string(),
        });

        assert_eq!(err.to_string(), "API error: 502");
    }

    #[test]
    fn test_status_code_only_for_api_errors() {
        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_timeout());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidConfiguration(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_parse_error_names_schema() {
        let err = Error::new(ErrorKind::Parse {
            schema: "DatabaseInformation",
            message: "missing field `db_name`".to_string(),
        });
        assert!(err.to_string().contains("DatabaseInformation"));
        assert!(err.to_string().contains("db_name"));
    }
}

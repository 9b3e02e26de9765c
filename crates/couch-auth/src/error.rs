//! Error types for wharf-couch-auth.

/// Result type alias for couch-auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Authentication configuration error.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A credential required by the chosen authenticator is missing.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A credential has an invalid shape (empty, bad characters, ...).
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// The configured authentication type is not recognized.
    #[error("Unknown authentication type: {0}")]
    UnknownAuthType(String),

    /// Environment configuration for the named service is absent.
    #[error("No configuration found for service '{0}'")]
    NotConfigured(String),
}

impl From<AuthError> for wharf_couch_client::Error {
    fn from(err: AuthError) -> Self {
        wharf_couch_client::Error::with_source(
            wharf_couch_client::ErrorKind::InvalidConfiguration(err.to_string()),
            err,
        )
    }
}

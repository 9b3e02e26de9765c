//! Authenticator contract and concrete authenticators.
//!
//! An authenticator mutates an outgoing request to add credentials. It is
//! invoked exactly once per call, immediately before the transport send, and
//! must be thread-safe: one authenticator instance is shared by every
//! concurrent caller of a client.
//!
//! All credential-bearing types implement custom `Debug` that redacts
//! secrets.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use wharf_couch_client::RequestBuilder;

use crate::error::{AuthError, Result};

/// A capability that adds authentication credentials to a request.
///
/// `Debug` is a supertrait so clients holding a `dyn Authenticator` can
/// derive their own `Debug`; implementations must redact secrets.
pub trait Authenticator: std::fmt::Debug + Send + Sync {
    /// Mutate the outgoing request to carry credentials.
    fn authenticate(&self, request: &mut RequestBuilder) -> Result<()>;

    /// The authentication scheme name ("noauth", "basic", "bearerToken",
    /// "couchdbSession").
    fn authentication_type(&self) -> &'static str;

    /// Validate the authenticator's configuration. Called once at client
    /// construction.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Authenticator that adds nothing. For servers in admin-party mode or
/// behind an authenticating proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

impl Authenticator for NoAuthAuthenticator {
    fn authenticate(&self, _request: &mut RequestBuilder) -> Result<()> {
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        "noauth"
    }
}

/// HTTP basic authentication.
#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl std::fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BasicAuthenticator {
    /// Create a basic authenticator from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, request: &mut RequestBuilder) -> Result<()> {
        let encoded = BASE64.encode(format!("{}:{}", self.username, self.password));
        request.set_header("Authorization", format!("Basic {encoded}"));
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        "basic"
    }

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(AuthError::MissingCredential("username".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingCredential("password".to_string()));
        }
        // A ':' in the username corrupts the encoded pair.
        if self.username.contains(':') {
            return Err(AuthError::InvalidCredential(
                "username must not contain ':'".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bearer-token authentication. The token is supplied by the caller; token
/// acquisition and refresh (IAM exchange) are external collaborators.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl BearerTokenAuthenticator {
    /// Create a bearer-token authenticator.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authenticator for BearerTokenAuthenticator {
    fn authenticate(&self, request: &mut RequestBuilder) -> Result<()> {
        request.set_header("Authorization", format!("Bearer {}", self.token));
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        "bearerToken"
    }

    fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(AuthError::MissingCredential("bearer_token".to_string()));
        }
        Ok(())
    }
}

/// CouchDB session-cookie authentication.
///
/// Holds the username/password pair and, once a session has been obtained
/// (via `POST /_session`, an external exchange), attaches the session cookie
/// to every request. Without a session token it falls back to basic
/// credentials so the first `post_session`-style exchange can bootstrap.
#[derive(Clone)]
pub struct CouchDbSessionAuthenticator {
    username: String,
    password: String,
    session_cookie: Option<String>,
}

impl std::fmt::Debug for CouchDbSessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouchDbSessionAuthenticator")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CouchDbSessionAuthenticator {
    /// Create a session authenticator from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            session_cookie: None,
        }
    }

    /// The username the session belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password, for the external session exchange.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Install a session cookie value (`AuthSession=...`) obtained from the
    /// `Set-Cookie` header of a session exchange.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

impl Authenticator for CouchDbSessionAuthenticator {
    fn authenticate(&self, request: &mut RequestBuilder) -> Result<()> {
        match &self.session_cookie {
            Some(cookie) => {
                request.set_header("Cookie", cookie.clone());
            }
            None => {
                let encoded = BASE64.encode(format!("{}:{}", self.username, self.password));
                request.set_header("Authorization", format!("Basic {encoded}"));
            }
        }
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        "couchdbSession"
    }

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(AuthError::MissingCredential("username".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingCredential("password".to_string()));
        }
        Ok(())
    }
}

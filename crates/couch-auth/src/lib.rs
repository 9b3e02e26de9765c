//! # wharf-couch-auth
//!
//! Authenticator capability for the CouchDB/Cloudant API client.
//!
//! An [`Authenticator`] mutates an outgoing request to add credentials; it
//! is invoked once per call, immediately before the transport send. This
//! crate ships the contract plus the concrete authenticators that need no
//! external token exchange:
//!
//! - [`NoAuthAuthenticator`] — adds nothing
//! - [`BasicAuthenticator`] — `Authorization: Basic ...`
//! - [`BearerTokenAuthenticator`] — `Authorization: Bearer ...` with a
//!   caller-supplied token
//! - [`CouchDbSessionAuthenticator`] — session cookie, with basic fallback
//!   until a session is installed
//!
//! Environment-based lookup for `new_instance(service_name)` construction
//! lives in [`authenticator_from_env`] / [`service_url_from_env`].

mod authenticator;
mod config;
mod error;

pub use authenticator::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, CouchDbSessionAuthenticator,
    NoAuthAuthenticator,
};
pub use config::{authenticator_from_env, service_url_from_env};
pub use error::{AuthError, Result};

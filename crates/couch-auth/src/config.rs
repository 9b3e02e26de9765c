//! Environment-based service configuration.
//!
//! `new_instance`-style construction resolves credentials from process
//! environment variables named after the service:
//!
//! ```text
//! CLOUDANT_URL=https://host.example
//! CLOUDANT_AUTH_TYPE=basic          # noauth | basic | bearerToken | couchdbSession
//! CLOUDANT_USERNAME=admin
//! CLOUDANT_PASSWORD=...
//! CLOUDANT_BEARER_TOKEN=...
//! ```
//!
//! The service name is upper-cased and `-`/`.` map to `_`.

use std::sync::Arc;

use crate::authenticator::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, CouchDbSessionAuthenticator,
    NoAuthAuthenticator,
};
use crate::error::{AuthError, Result};

fn env_key(service_name: &str, suffix: &str) -> String {
    let prefix: String = service_name
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("{prefix}_{suffix}")
}

fn env_var(service_name: &str, suffix: &str) -> Option<String> {
    std::env::var(env_key(service_name, suffix))
        .ok()
        .filter(|v| !v.is_empty())
}

/// Resolve the service URL for the named service from the environment.
pub fn service_url_from_env(service_name: &str) -> Result<String> {
    env_var(service_name, "URL").ok_or_else(|| AuthError::NotConfigured(service_name.to_string()))
}

/// Build an authenticator for the named service from the environment.
///
/// When `{NAME}_AUTH_TYPE` is absent, the type is inferred: a bearer token
/// implies `bearerToken`, a username/password pair implies `basic`.
pub fn authenticator_from_env(service_name: &str) -> Result<Arc<dyn Authenticator>> {
    let auth_type = env_var(service_name, "AUTH_TYPE");
    let username = env_var(service_name, "USERNAME");
    let password = env_var(service_name, "PASSWORD");
    let bearer = env_var(service_name, "BEARER_TOKEN");

    let inferred = match auth_type.as_deref() {
        Some(t) => t.to_string(),
        None if bearer.is_some() => "bearerToken".to_string(),
        None if username.is_some() || password.is_some() => "basic".to_string(),
        None => "noauth".to_string(),
    };

    let authenticator: Arc<dyn Authenticator> = match inferred.as_str() {
        "noauth" => Arc::new(NoAuthAuthenticator),
        "basic" => {
            let auth = BasicAuthenticator::new(
                username.ok_or_else(|| AuthError::MissingCredential(env_key(service_name, "USERNAME")))?,
                password.ok_or_else(|| AuthError::MissingCredential(env_key(service_name, "PASSWORD")))?,
            );
            auth.validate()?;
            Arc::new(auth)
        }
        "bearerToken" => {
            let auth = BearerTokenAuthenticator::new(bearer.ok_or_else(|| {
                AuthError::MissingCredential(env_key(service_name, "BEARER_TOKEN"))
            })?);
            auth.validate()?;
            Arc::new(auth)
        }
        "couchdbSession" => {
            let auth = CouchDbSessionAuthenticator::new(
                username.ok_or_else(|| AuthError::MissingCredential(env_key(service_name, "USERNAME")))?,
                password.ok_or_else(|| AuthError::MissingCredential(env_key(service_name, "PASSWORD")))?,
            );
            auth.validate()?;
            Arc::new(auth)
        }
        other => return Err(AuthError::UnknownAuthType(other.to_string())),
    };

    Ok(authenticator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_normalization() {
        assert_eq!(env_key("cloudant", "URL"), "CLOUDANT_URL");
        assert_eq!(env_key("my-service.v1", "AUTH_TYPE"), "MY_SERVICE_V1_AUTH_TYPE");
    }

    // Environment-variable tests use unique service names so parallel test
    // execution cannot interfere.

    #[test]
    fn test_basic_from_env() {
        std::env::set_var("AUTHTEST_BASIC_USERNAME", "admin");
        std::env::set_var("AUTHTEST_BASIC_PASSWORD", "secret");

        let auth = authenticator_from_env("authtest-basic").unwrap();
        assert_eq!(auth.authentication_type(), "basic");
    }

    #[test]
    fn test_bearer_inferred_from_env() {
        std::env::set_var("AUTHTEST_BEARER_BEARER_TOKEN", "tok");

        let auth = authenticator_from_env("authtest-bearer").unwrap();
        assert_eq!(auth.authentication_type(), "bearerToken");
    }

    #[test]
    fn test_noauth_when_nothing_configured() {
        let auth = authenticator_from_env("authtest-empty").unwrap();
        assert_eq!(auth.authentication_type(), "noauth");
    }

    #[test]
    fn test_unknown_auth_type_rejected() {
        std::env::set_var("AUTHTEST_UNKNOWN_AUTH_TYPE", "iam-nonsense");
        let err = authenticator_from_env("authtest-unknown").unwrap_err();
        assert!(matches!(err, AuthError::UnknownAuthType(_)));
    }

    #[test]
    fn test_service_url_from_env() {
        std::env::set_var("AUTHTEST_URL_URL", "https://couch.example");
        assert_eq!(
            service_url_from_env("authtest-url").unwrap(),
            "https://couch.example"
        );
        assert!(matches!(
            service_url_from_env("authtest-url-missing"),
            Err(AuthError::NotConfigured(_))
        ));
    }
}

//! Security documents, API keys, and CORS configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::SecurityRole;

/// A database `_security` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Security {
    /// Database admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<SecurityObject>,

    /// Cloudant-style access map: user or API key to granted roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudant: Option<HashMap<String, Vec<SecurityRole>>>,

    /// When true, only the CouchDB security object grants access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couchdb_auth_only: Option<bool>,

    /// Database members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<SecurityObject>,
}

/// Names and roles granted a level of access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityObject {
    /// User names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,

    /// Role names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Result of generating an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeysResult {
    /// True on success.
    pub ok: bool,

    /// The generated key.
    pub key: String,

    /// The generated passphrase, shown only once.
    pub password: String,
}

/// CORS configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsInformation {
    /// Allow credentialed requests.
    pub allow_credentials: bool,

    /// Whether CORS is enabled.
    pub enable_cors: bool,

    /// Allowed origins; `["*"]` allows all.
    pub origins: Vec<String>,
}

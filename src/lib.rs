//! # wharf-couch-api
//!
//! A typed CouchDB/Cloudant API client library for Rust.
//!
//! This library provides type-safe access to the CouchDB/Cloudant REST API
//! with pluggable authentication, request compression, and structured
//! error handling.
//!
//! ## Security
//!
//! - Credentials (passwords, tokens, API keys) are redacted in Debug output
//! - Tracing skips credential and body parameters
//! - Authenticators validate their configuration before any request is sent
//!
//! ## Crates
//!
//! - **wharf-couch-client** - Core HTTP infrastructure: request building,
//!   gzip, response envelopes, error extraction
//! - **wharf-couch-auth** - Authentication: basic, bearer, session cookie,
//!   environment-based configuration
//! - **wharf-couch-rest** - The typed API surface: documents, queries,
//!   views, search, replication, server administration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wharf_couch_api::auth::BasicAuthenticator;
//! use wharf_couch_api::CloudantClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = CloudantClient::new(BasicAuthenticator::new("admin", "pass"))?;
//!     client.set_service_url("https://couch.example.com")?;
//!
//!     let server = client.get_server_information().await?;
//!     println!("CouchDB {}", server.result.version);
//!
//!     let docs = client
//!         .post_all_docs("orders", &wharf_couch_api::rest::AllDocsQuery::default())
//!         .await?;
//!     println!("{} rows", docs.result.rows.len());
//!
//!     Ok(())
//! }
//! ```

// Re-export member crates for convenient access
#[cfg(feature = "auth")]
pub use wharf_couch_auth as auth;
#[cfg(feature = "client")]
pub use wharf_couch_client as client;
#[cfg(feature = "rest")]
pub use wharf_couch_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use wharf_couch_auth::Authenticator;
#[cfg(feature = "client")]
pub use wharf_couch_client::{ByteStream, ClientConfig, DetailedResponse, Error, ErrorKind};
#[cfg(feature = "rest")]
pub use wharf_couch_rest::{CloudantClient, DEFAULT_SERVICE_URL};

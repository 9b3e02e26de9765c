//! # wharf-couch-rest
//!
//! Typed CouchDB/Cloudant REST API client.
//!
//! ## Features
//!
//! - **Documents** - CRUD, attachments, local documents, bulk operations
//! - **Queries** - Primary index, views, selector queries, search indexes
//! - **Databases** - Create, delete, inspect, partitioned databases
//! - **Changes** - Database changes feeds, parsed or streamed
//! - **Replication** - `_replicator` documents and the scheduler
//! - **Server** - Session, security, CORS, health, and usage endpoints
//!
//! Every operation returns a [`DetailedResponse`] carrying the HTTP status,
//! response headers, and either a parsed result model or an unread
//! [`ByteStream`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use wharf_couch_auth::BasicAuthenticator;
//! use wharf_couch_rest::CloudantClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wharf_couch_rest::Error> {
//!     let mut client = CloudantClient::new(BasicAuthenticator::new("admin", "pass"))?;
//!     client.set_service_url("https://couch.example.com")?;
//!
//!     let info = client.get_database_information("orders").await?;
//!     println!("{} documents", info.result.doc_count);
//!
//!     Ok(())
//! }
//! ```

mod bulk;
mod changes;
mod client;
mod database;
mod design;
mod document;
mod enums;
mod error;
mod query;
mod replication;
mod scheduler;
mod search;
mod security;
mod serde_ext;
mod server;
mod view;

// Main client, operation option types, and the default service URL
pub use client::*;

// Result and request models, one module per API area
pub use bulk::*;
pub use changes::*;
pub use database::*;
pub use design::*;
pub use document::*;
pub use enums::*;
pub use query::*;
pub use replication::*;
pub use scheduler::*;
pub use search::*;
pub use security::*;
pub use server::*;
pub use view::*;

// Error types
pub use error::{Error, ErrorKind, Result};

// Re-export transport types that appear in operation signatures
pub use wharf_couch_client::{
    ByteStream, ClientConfig, ClientConfigBuilder, DetailedResponse, RequestBuilder,
};

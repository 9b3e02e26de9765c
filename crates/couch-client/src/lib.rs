//! # wharf-couch-client
//!
//! Core HTTP client infrastructure for the CouchDB/Cloudant API.
//!
//! This crate provides the request/response engine the typed API surface
//! (`wharf-couch-rest`) is built on:
//! - Request building: path-segment encoding, ordered query assembly with
//!   unset-omission, layered headers, JSON/byte bodies
//! - Gzip compression of JSON request bodies (on by default)
//! - Uniform [`DetailedResponse`] envelope with status, headers, and either
//!   a parsed result or a lazy [`ByteStream`]
//! - CouchDB error-envelope extraction into structured `Api` errors
//! - Connection pooling and request tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │                 (wharf-couch-rest facade)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CouchHttpClient                          │
//! │  - Executes prepared RequestBuilders                        │
//! │  - Gzips JSON bodies, maps transport errors                 │
//! │  - Produces CouchResponse / DetailedResponse                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod config;
pub mod encode;
mod error;
mod request;
mod response;

pub use client::CouchHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{ByteStream, CouchResponse, DetailedResponse};

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("wharf-couch-api/", env!("CARGO_PKG_VERSION"));

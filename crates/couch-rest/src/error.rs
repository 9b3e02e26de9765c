//! Error types for the typed API surface.
//!
//! The façade raises the same taxonomy as the HTTP engine; no extra kinds
//! are layered on top.

pub use wharf_couch_client::{Error, ErrorKind, Result};

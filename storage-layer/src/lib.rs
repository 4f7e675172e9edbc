//! Durable key-value storage for ChamaLedger collections
//!
//! Provides:
//! - Composite storage keys scoping each serialized collection
//! - A synchronous `StorageBackend` trait with typed load/store helpers
//! - A JSON-file backend for durable local persistence
//! - An in-memory backend for tests and ephemeral runs
//!
//! Every value is a JSON-serialized collection. A missing key loads as the
//! collection's default (empty); a malformed value also loads as the default
//! rather than failing the whole application.

pub mod backend;
pub mod error;
pub mod file;
pub mod key;
pub mod memory;

pub use backend::*;
pub use error::*;
pub use file::*;
pub use key::*;
pub use memory::*;

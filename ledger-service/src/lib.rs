//! Savings-group ledger for ChamaLedger
//!
//! Provides the group-scoped financial core:
//! - Groups, active-group selection, savings and loan records (`store`)
//! - Per-group member rosters (`members`)
//! - Derived reporting over ledger records (`reporting`)
//!
//! The ledger writes every mutation through to a [`storage_layer`] backend
//! before returning, so the in-memory collections and the persisted state
//! never drift apart within a process.

pub mod error;
pub mod members;
pub mod models;
pub mod reporting;
pub mod store;

pub use error::*;
pub use members::*;
pub use models::*;
pub use reporting::*;
pub use store::*;

//! Core business logic - framework-agnostic authentication and ledger operations.
//!
//! All functions take a `DatabaseConnection` and return crate `Result`s so
//! that any serving surface can sit on top without pulling UI concerns into
//! the bookkeeping rules.

/// Login verification and password hashing
pub mod auth;
/// Per-type entry validation, recording, and filtered retrieval
pub mod entry;
/// Outstanding-balance bookkeeping rules
pub mod ledger;
/// Server-side login sessions
pub mod session;
/// Account lifecycle management
pub mod user;

//! Unified error types for `Ticketbook`.
//!
//! Configuration errors are fatal at startup; database errors abort the
//! current operation without retry; validation, duplicate-username, and
//! authentication errors are recoverable and surfaced inline by callers.

use thiserror::Error;

/// Top-level error type covering configuration, storage, and domain failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration problem, e.g. a missing `DATABASE_URL`. Fatal.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what is missing or malformed
        message: String,
    },

    /// Storage-layer failure surfaced from `SeaORM`. Never retried here.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Password hashing or verification failure from bcrypt.
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A submitted entry or account failed validation; nothing was written.
    #[error("Validation failed, missing or invalid fields: {}", missing_fields.join(", "))]
    Validation {
        /// Names of the fields that were absent or carried invalid values
        missing_fields: Vec<String>,
    },

    /// The requested username is already taken (also backed by a unique
    /// index at the storage layer).
    #[error("Username '{username}' already exists")]
    DuplicateUsername {
        /// The conflicting login name
        username: String,
    },

    /// Login rejected; see [`AuthFailure`] for the (non-leaking) sub-cases.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// First-admin bootstrap attempted after an account already exists.
    #[error("Bootstrap is closed: an account already exists")]
    BootstrapClosed,

    /// A stored entry carries a type tag the ledger does not recognize.
    #[error("Unknown entry type in storage: {entry_type}")]
    UnknownEntryType {
        /// The unrecognized `entry_type` column value
        entry_type: String,
    },

    /// A referenced user row does not exist.
    #[error("User not found: {id}")]
    UserNotFound {
        /// Primary key that failed to resolve
        id: i32,
    },
}

/// Why a login was rejected.
///
/// The sub-case is kept in the error value for logs and tests, but every
/// variant displays the identical message: the user-facing text must not
/// reveal whether a username exists or an account is merely inactive.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No account with that username
    #[error("invalid login or user inactive")]
    NotFound,
    /// The account exists but its active flag is off
    #[error("invalid login or user inactive")]
    Inactive,
    /// The password did not match the stored hash
    #[error("invalid login or user inactive")]
    BadCredential,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

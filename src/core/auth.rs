//! Authentication gate - validates credentials against stored bcrypt hashes.
//!
//! The gate is strictly read-only: no lockout counters, no rate limiting, no
//! audit rows. All three failure cases (unknown username, inactive account,
//! wrong password) render the same message; see [`AuthFailure`].

use crate::{
    entities::{User, user},
    errors::{AuthFailure, Error, Result},
};
use sea_orm::prelude::*;
use tracing::{debug, instrument};

/// Hashes a plaintext password with a randomized salt.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(Into::into)
}

/// Checks a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    bcrypt::verify(password, password_hash).map_err(Into::into)
}

/// Verifies a username/password pair and returns the matching account.
///
/// Lookup is an exact, case-sensitive match on the trimmed username. The
/// failure sub-case is preserved in the returned error for logging and
/// tests, but every sub-case displays identically to the caller.
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let account = User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?;

    let Some(account) = account else {
        debug!(username, "login rejected: unknown username");
        return Err(Error::Auth(AuthFailure::NotFound));
    };

    if !account.active {
        debug!(username, "login rejected: account inactive");
        return Err(Error::Auth(AuthFailure::Inactive));
    }

    if !verify_password(password, &account.password_hash)? {
        debug!(username, "login rejected: bad credential");
        return Err(Error::Auth(AuthFailure::BadCredential));
    }

    Ok(account)
}

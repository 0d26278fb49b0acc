//! Server-side login sessions.
//!
//! The logged-in user is never process-global state: after authentication a
//! caller opens a session, holds only the opaque token, and resolves it per
//! request against the `sessions` table. Tokens are UUID v4 and expire eight
//! hours after login.

use crate::{
    entities::{Session, User, session, user},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{ModelTrait, Set, prelude::*};
use tracing::{debug, instrument};

/// How long a session stays valid after login.
pub const SESSION_TTL_HOURS: i64 = 8;

/// Opens a session for an authenticated user and returns the opaque token.
#[instrument(skip(db))]
pub async fn open_session(db: &DatabaseConnection, user_id: i32) -> Result<String> {
    let token = uuid::Uuid::new_v4().to_string();
    let now = Utc::now();

    session::ActiveModel {
        token: Set(token.clone()),
        user_id: Set(user_id),
        created_at: Set(now),
        expires_at: Set(now + Duration::hours(SESSION_TTL_HOURS)),
    }
    .insert(db)
    .await?;

    Ok(token)
}

/// Resolves a token to its session and account.
///
/// Returns `None` for tokens that were never issued, sessions past their
/// expiry (which are pruned on sight), and accounts that have been
/// deactivated since login.
pub async fn resolve_session(
    db: &DatabaseConnection,
    token: &str,
) -> Result<Option<(session::Model, user::Model)>> {
    let Some(current) = Session::find_by_id(token).one(db).await? else {
        return Ok(None);
    };

    if Utc::now() > current.expires_at {
        debug!(token, "pruning expired session");
        current.delete(db).await?;
        return Ok(None);
    }

    let Some(account) = User::find_by_id(current.user_id).one(db).await? else {
        return Ok(None);
    };
    if !account.active {
        return Ok(None);
    }

    Ok(Some((current, account)))
}

/// Logout: removes the session row if it exists.
#[instrument(skip(db))]
pub async fn close_session(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_by_id(token).exec(db).await?;
    Ok(())
}

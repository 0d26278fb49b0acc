//! Account lifecycle management.
//!
//! Accounts are created by an admin (or the one-time bootstrap path when the
//! store is empty) and are never deleted: deactivation and password reset
//! are the only mutations. Identity fields are whitespace-trimmed on write.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Account role, stored in the `role` column as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full dashboard access: user administration, all accounts' entries
    Admin,
    /// May record entries and view their own ledger only
    Staff,
}

impl Role {
    /// Column representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }
}

/// Returns true when at least one account exists.
///
/// This gates the one-time first-admin bootstrap path: the moment any
/// account is present, bootstrap is closed for good.
pub async fn users_exist(db: &DatabaseConnection) -> Result<bool> {
    Ok(User::find().count(db).await? > 0)
}

/// Creates a new account with a salted bcrypt password hash.
///
/// Username and display name are trimmed before storage. Fails with
/// [`Error::DuplicateUsername`] when the login name is taken; the unique
/// index on `username` backs this up at the storage layer.
#[instrument(skip(db, password))]
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: Role,
    staff_name: &str,
) -> Result<user::Model> {
    let username = username.trim();
    let staff_name = staff_name.trim();

    let mut missing_fields = Vec::new();
    if username.is_empty() {
        missing_fields.push("username".to_string());
    }
    if password.is_empty() {
        missing_fields.push("password".to_string());
    }
    if staff_name.is_empty() {
        missing_fields.push("staff_name".to_string());
    }
    if !missing_fields.is_empty() {
        return Err(Error::Validation { missing_fields });
    }

    let existing = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateUsername {
            username: username.to_string(),
        });
    }

    let account = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(crate::core::auth::hash_password(password)?),
        role: Set(role.as_str().to_string()),
        staff_name: Set(staff_name.to_string()),
        active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = account.insert(db).await?;
    info!(username = %created.username, role = role.as_str(), "account created");
    Ok(created)
}

/// One-time first-admin path: creates an admin account only while the user
/// store is empty, and refuses with [`Error::BootstrapClosed`] afterwards.
pub async fn bootstrap_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    staff_name: &str,
) -> Result<user::Model> {
    if users_exist(db).await? {
        return Err(Error::BootstrapClosed);
    }
    create_user(db, username, password, Role::Admin, staff_name).await
}

/// Flips an account's active flag. Inactive accounts keep their entries and
/// opening balance but can no longer log in.
#[instrument(skip(db))]
pub async fn set_user_active(db: &DatabaseConnection, user_id: i32, active: bool) -> Result<()> {
    let account = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let mut account: user::ActiveModel = account.into();
    account.active = Set(active);
    account.update(db).await?;
    Ok(())
}

/// Replaces an account's password hash with a freshly salted one.
#[instrument(skip(db, new_password))]
pub async fn reset_password(
    db: &DatabaseConnection,
    user_id: i32,
    new_password: &str,
) -> Result<()> {
    if new_password.is_empty() {
        return Err(Error::Validation {
            missing_fields: vec!["password".to_string()],
        });
    }

    let account = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let mut account: user::ActiveModel = account.into();
    account.password_hash = Set(crate::core::auth::hash_password(new_password)?);
    account.update(db).await?;
    Ok(())
}

/// All accounts ordered by role, then display name, for the admin user table.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Role)
        .order_by_asc(user::Column::StaffName)
        .all(db)
        .await
        .map_err(Into::into)
}

//! User entity - Represents one login account, admin or staff.
//!
//! Accounts are created by an admin (or the one-time bootstrap path) and are
//! never deleted; the `active` flag is the only lifecycle control. Passwords
//! are stored exclusively as salted bcrypt hashes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login name, unique across the system, matched case-sensitively
    #[sea_orm(unique)]
    pub username: String,
    /// Salted bcrypt hash of the password; plaintext is never persisted
    pub password_hash: String,
    /// Account role: `"admin"` or `"staff"`
    pub role: String,
    /// Display name shown on dashboards and reports
    pub staff_name: String,
    /// Inactive accounts keep their history but cannot log in
    pub active: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many ledger entries
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
    /// One user has at most one opening balance override
    #[sea_orm(has_one = "super::opening_balance::Entity")]
    OpeningBalance,
    /// One user may hold several live sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::opening_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpeningBalance.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Session entity - One server-side login session.
//!
//! Sessions replace the process-global "logged-in user" state of the original
//! dashboard: callers hold only the opaque token and resolve it per request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Opaque session token (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    /// Account this session belongs to
    pub user_id: i32,
    /// When the session was opened
    pub created_at: DateTimeUtc,
    /// Hard expiry; expired sessions are pruned on lookup
    pub expires_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to exactly one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

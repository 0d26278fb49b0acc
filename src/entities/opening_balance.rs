//! Opening balance entity - Admin-set starting outstanding amount.
//!
//! At most one row per staff account. Each update overwrites the previous
//! value; opening balances never accumulate. Accounts without a row start
//! from the implicit zero baseline.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Opening balance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opening_balances")]
pub struct Model {
    /// Staff user this opening balance belongs to (one row per account)
    #[sea_orm(primary_key, auto_increment = false)]
    pub staff_user_id: i32,
    /// Starting outstanding amount in cents; may be negative
    pub opening_amount_cents: i64,
    /// When an admin last overwrote this value
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between OpeningBalance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each opening balance belongs to exactly one staff user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StaffUserId",
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

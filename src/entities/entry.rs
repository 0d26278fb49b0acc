//! Entry entity - One dated financial record: SALE, REFUND, RECEIPT, or ADM.
//!
//! Rows are append-only; nothing in this crate updates or deletes them.
//! Monetary columns hold non-negative amounts in cents exactly as submitted.
//! The arithmetic direction of each entry type is applied at read time by
//! [`crate::core::ledger::movement`], never at write time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the staff user who recorded this entry
    pub staff_user_id: i32,
    /// Business date of the entry (travel date / receipt date)
    pub entry_date: Date,
    /// Type tag: `"SALE"`, `"REFUND"`, `"RECEIPT"`, or `"ADM"`
    pub entry_type: String,
    /// Ticket document number (SALE/REFUND only)
    pub ticket_number: Option<String>,
    /// Passenger name as ticketed (SALE/REFUND only)
    pub passenger_name: Option<String>,
    /// Two-letter carrier code, e.g. `"EK"` (SALE/REFUND only)
    pub carrier_code: Option<String>,
    /// Itinerary, e.g. `"DXB-LHR"`
    pub route: Option<String>,
    /// Issuing supplier or consolidator
    pub supplier: Option<String>,
    /// Receipt or debit-memo reference (RECEIPT/ADM only)
    pub reference_number: Option<String>,
    /// Free-text remarks
    pub notes: Option<String>,
    /// Base fare in cents (SALE/REFUND only)
    pub basic_fare_cents: Option<i64>,
    /// Agency commission in cents (SALE/REFUND only)
    pub commission_cents: Option<i64>,
    /// Net payable to the supplier in cents (SALE/REFUND only)
    pub net_to_supplier_cents: Option<i64>,
    /// Amount billed to the customer in cents (SALE/REFUND only)
    pub bill_to_customer_cents: Option<i64>,
    /// Receipt or ADM amount in cents (RECEIPT/ADM only)
    pub amount_cents: Option<i64>,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Entry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to exactly one staff user
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

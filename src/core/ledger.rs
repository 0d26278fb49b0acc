//! Outstanding-balance bookkeeping rules.
//!
//! This ledger applies the arithmetic direction of each entry type at read
//! time (type dispatch): stored amounts stay non-negative exactly as
//! submitted, and [`movement`] supplies the sign. SALE raises what a
//! customer owes, REFUND and RECEIPT lower it, ADM raises it.
//!
//! An account's outstanding balance is always the fold over its *entire*
//! entry history plus the opening balance. It is never windowed by whatever
//! date range a listing happens to display: a balance is not a period
//! metric.

use crate::{
    core::{entry::EntryType, user::Role},
    entities::{Entry, OpeningBalance, User, entry, opening_balance, user},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Signed movement of one entry against its account's outstanding balance,
/// in cents.
pub fn movement(row: &entry::Model) -> Result<i64> {
    Ok(match EntryType::from_column(&row.entry_type)? {
        EntryType::Sale => row.bill_to_customer_cents.unwrap_or(0),
        EntryType::Refund => -row.bill_to_customer_cents.unwrap_or(0),
        EntryType::Receipt => -row.amount_cents.unwrap_or(0),
        EntryType::Adm => row.amount_cents.unwrap_or(0),
    })
}

/// Admin-set starting balance for an account, zero when never set.
pub async fn opening_balance(db: &DatabaseConnection, staff_user_id: i32) -> Result<i64> {
    Ok(OpeningBalance::find_by_id(staff_user_id)
        .one(db)
        .await?
        .map_or(0, |row| row.opening_amount_cents))
}

/// Overwrites the opening balance for an account.
///
/// An idempotent upsert keyed by the account: repeated calls replace the
/// value, they never accumulate. Admin-only at the calling layer.
#[instrument(skip(db))]
pub async fn set_opening_balance(
    db: &DatabaseConnection,
    staff_user_id: i32,
    amount_cents: i64,
) -> Result<()> {
    match OpeningBalance::find_by_id(staff_user_id).one(db).await? {
        Some(existing) => {
            let mut existing: opening_balance::ActiveModel = existing.into();
            existing.opening_amount_cents = Set(amount_cents);
            existing.updated_at = Set(chrono::Utc::now());
            existing.update(db).await?;
        }
        None => {
            opening_balance::ActiveModel {
                staff_user_id: Set(staff_user_id),
                opening_amount_cents: Set(amount_cents),
                updated_at: Set(chrono::Utc::now()),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Sum of movements over the account's entire entry history, in cents.
async fn movement_total(db: &DatabaseConnection, staff_user_id: i32) -> Result<i64> {
    let entries = Entry::find()
        .filter(entry::Column::StaffUserId.eq(staff_user_id))
        .all(db)
        .await?;

    let mut total: i64 = 0;
    for row in &entries {
        total += movement(row)?;
    }
    Ok(total)
}

/// Outstanding balance for one account, in cents:
/// opening balance plus the movement of every entry ever recorded.
pub async fn outstanding(db: &DatabaseConnection, staff_user_id: i32) -> Result<i64> {
    Ok(opening_balance(db, staff_user_id).await? + movement_total(db, staff_user_id).await?)
}

/// One line of the admin outstanding summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OutstandingRow {
    /// The staff account this line describes
    pub user: user::Model,
    /// Admin-set starting balance in cents (zero when unset)
    pub opening_cents: i64,
    /// Sum of all entry movements in cents
    pub movement_cents: i64,
    /// `opening_cents + movement_cents`
    pub outstanding_cents: i64,
}

/// Per-account outstanding across all staff accounts, for the admin
/// dashboard. Inactive staff are included; their history still counts.
pub async fn outstanding_summary(db: &DatabaseConnection) -> Result<Vec<OutstandingRow>> {
    let staff = User::find()
        .filter(user::Column::Role.eq(Role::Staff.as_str()))
        .order_by_asc(user::Column::StaffName)
        .all(db)
        .await?;

    let mut rows = Vec::with_capacity(staff.len());
    for account in staff {
        let opening_cents = opening_balance(db, account.id).await?;
        let movement_cents = movement_total(db, account.id).await?;
        rows.push(OutstandingRow {
            user: account,
            opening_cents,
            movement_cents,
            outstanding_cents: opening_cents + movement_cents,
        });
    }
    Ok(rows)
}

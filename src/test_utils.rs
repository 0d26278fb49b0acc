//! Shared test utilities for `Ticketbook`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test accounts and entry drafts with sensible
//! defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::entry::{EntryDraft, MemoDraft, TicketDraft},
    core::user::Role,
    entities::user,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// The plaintext password every test account is created with.
pub const TEST_PASSWORD: &str = "hunter2";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts an account directly with a minimum-cost bcrypt hash of
/// [`TEST_PASSWORD`], keeping test setup fast. Production accounts go
/// through `core::user::create_user`, which uses the default cost.
pub async fn insert_test_user(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
    active: bool,
) -> Result<user::Model> {
    let account = user::ActiveModel {
        username: Set(username.to_string()),
        // Cost 4 is the bcrypt minimum; production hashing uses DEFAULT_COST
        password_hash: Set(bcrypt::hash(TEST_PASSWORD, 4)?),
        role: Set(role.as_str().to_string()),
        staff_name: Set(format!("Staff {username}")),
        active: Set(active),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    account.insert(db).await.map_err(Into::into)
}

/// Creates an active staff account named `Staff <username>`.
pub async fn create_test_staff(
    db: &DatabaseConnection,
    username: &str,
) -> Result<user::Model> {
    insert_test_user(db, username, Role::Staff, true).await
}

/// Builds a `NaiveDate`, panicking on impossible inputs (test-only).
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A complete, valid ticket draft billing the given cents to the customer.
#[must_use]
pub fn ticket_draft(bill_to_customer_cents: i64) -> TicketDraft {
    TicketDraft {
        ticket_number: "176-1234567890".to_string(),
        passenger_name: "DOE/JANE MS".to_string(),
        carrier_code: "EK".to_string(),
        route: Some("DXB-LHR".to_string()),
        supplier: Some("Consolidated Travel".to_string()),
        basic_fare_cents: bill_to_customer_cents / 2,
        commission_cents: bill_to_customer_cents / 20,
        net_to_supplier_cents: bill_to_customer_cents / 2,
        bill_to_customer_cents,
    }
}

/// A valid SALE draft.
#[must_use]
pub fn sale_draft(bill_to_customer_cents: i64) -> EntryDraft {
    EntryDraft::Sale(ticket_draft(bill_to_customer_cents))
}

/// A valid REFUND draft.
#[must_use]
pub fn refund_draft(bill_to_customer_cents: i64) -> EntryDraft {
    EntryDraft::Refund(ticket_draft(bill_to_customer_cents))
}

/// A valid RECEIPT draft.
#[must_use]
pub fn receipt_draft(amount_cents: i64) -> EntryDraft {
    EntryDraft::Receipt(MemoDraft {
        reference_number: "RCPT-0001".to_string(),
        notes: None,
        amount_cents,
    })
}

/// A valid ADM draft.
#[must_use]
pub fn adm_draft(amount_cents: i64) -> EntryDraft {
    EntryDraft::Adm(MemoDraft {
        reference_number: "ADM-0001".to_string(),
        notes: Some("carrier debit memo".to_string()),
        amount_cents,
    })
}

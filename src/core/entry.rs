//! Entry recording and retrieval.
//!
//! An [`EntryDraft`] is a tagged union: each entry type carries only the
//! fields that exist for it, so a RECEIPT can never smuggle in a passenger
//! name and validation is dispatched on the type. Validation runs before any
//! storage work; a rejected draft performs no write at all.

use crate::{
    entities::{Entry, User, entry, user},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Entry type tag, stored uppercase in the `entry_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Ticket sale; raises what the customer owes
    Sale,
    /// Ticket refund; lowers what the customer owes
    Refund,
    /// Money received from the customer; lowers what is owed
    Receipt,
    /// Agency debit memo passed through to the customer; raises what is owed
    Adm,
}

impl EntryType {
    /// Column representation of the type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Refund => "REFUND",
            Self::Receipt => "RECEIPT",
            Self::Adm => "ADM",
        }
    }

    /// Parses a stored `entry_type` column value.
    pub fn from_column(value: &str) -> Result<Self> {
        match value {
            "SALE" => Ok(Self::Sale),
            "REFUND" => Ok(Self::Refund),
            "RECEIPT" => Ok(Self::Receipt),
            "ADM" => Ok(Self::Adm),
            other => Err(Error::UnknownEntryType {
                entry_type: other.to_string(),
            }),
        }
    }
}

/// Fields of a ticketed SALE or REFUND.
///
/// Amounts are non-negative cents as submitted; the refund direction is
/// applied at read time by the ledger, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    /// Ticket document number (required)
    pub ticket_number: String,
    /// Passenger name as ticketed (required)
    pub passenger_name: String,
    /// Two-letter carrier code (required)
    pub carrier_code: String,
    /// Itinerary, e.g. `"DXB-LHR"`
    pub route: Option<String>,
    /// Issuing supplier or consolidator
    pub supplier: Option<String>,
    /// Base fare in cents
    pub basic_fare_cents: i64,
    /// Agency commission in cents
    pub commission_cents: i64,
    /// Net payable to the supplier in cents
    pub net_to_supplier_cents: i64,
    /// Amount billed to the customer in cents
    pub bill_to_customer_cents: i64,
}

/// Fields of a RECEIPT or ADM memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoDraft {
    /// Receipt or debit-memo reference (required)
    pub reference_number: String,
    /// Free-text remarks
    pub notes: Option<String>,
    /// Memo amount in cents; must be strictly positive
    pub amount_cents: i64,
}

/// What a staff member submits: each variant carries only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDraft {
    /// Ticket sale
    Sale(TicketDraft),
    /// Ticket refund
    Refund(TicketDraft),
    /// Customer payment received
    Receipt(MemoDraft),
    /// Agency debit memo
    Adm(MemoDraft),
}

impl EntryDraft {
    /// The type tag this draft will be stored under.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        match self {
            Self::Sale(_) => EntryType::Sale,
            Self::Refund(_) => EntryType::Refund,
            Self::Receipt(_) => EntryType::Receipt,
            Self::Adm(_) => EntryType::Adm,
        }
    }
}

/// Checks the per-type required fields and amount signs.
///
/// SALE/REFUND need a ticket number, passenger name, and carrier code, with
/// all four monetary fields non-negative. RECEIPT/ADM need a reference
/// number and a strictly positive amount.
fn validate(draft: &EntryDraft) -> Result<()> {
    let mut missing_fields = Vec::new();

    match draft {
        EntryDraft::Sale(ticket) | EntryDraft::Refund(ticket) => {
            if ticket.ticket_number.trim().is_empty() {
                missing_fields.push("ticket_number".to_string());
            }
            if ticket.passenger_name.trim().is_empty() {
                missing_fields.push("passenger_name".to_string());
            }
            if ticket.carrier_code.trim().is_empty() {
                missing_fields.push("carrier_code".to_string());
            }
            for (field, cents) in [
                ("basic_fare", ticket.basic_fare_cents),
                ("commission", ticket.commission_cents),
                ("net_to_supplier", ticket.net_to_supplier_cents),
                ("bill_to_customer", ticket.bill_to_customer_cents),
            ] {
                if cents < 0 {
                    missing_fields.push(format!("{field} (must be non-negative)"));
                }
            }
        }
        EntryDraft::Receipt(memo) | EntryDraft::Adm(memo) => {
            if memo.reference_number.trim().is_empty() {
                missing_fields.push("reference_number".to_string());
            }
            if memo.amount_cents <= 0 {
                missing_fields.push("amount (must be positive)".to_string());
            }
        }
    }

    if missing_fields.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { missing_fields })
    }
}

/// Validates and appends one immutable entry for the given staff account.
///
/// There are no partial writes: validation completes before the insert, and
/// the insert is a single statement. Recorded entries are never edited or
/// deleted through this crate.
#[instrument(skip(db, draft), fields(entry_type = draft.entry_type().as_str()))]
pub async fn record_entry(
    db: &DatabaseConnection,
    staff_user_id: i32,
    entry_date: NaiveDate,
    draft: EntryDraft,
) -> Result<entry::Model> {
    validate(&draft)?;

    let mut row = entry::ActiveModel {
        staff_user_id: Set(staff_user_id),
        entry_date: Set(entry_date),
        entry_type: Set(draft.entry_type().as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match draft {
        EntryDraft::Sale(ticket) | EntryDraft::Refund(ticket) => {
            row.ticket_number = Set(Some(ticket.ticket_number.trim().to_string()));
            row.passenger_name = Set(Some(ticket.passenger_name.trim().to_string()));
            row.carrier_code = Set(Some(ticket.carrier_code.trim().to_string()));
            row.route = Set(ticket.route.map(|r| r.trim().to_string()));
            row.supplier = Set(ticket.supplier.map(|s| s.trim().to_string()));
            row.basic_fare_cents = Set(Some(ticket.basic_fare_cents));
            row.commission_cents = Set(Some(ticket.commission_cents));
            row.net_to_supplier_cents = Set(Some(ticket.net_to_supplier_cents));
            row.bill_to_customer_cents = Set(Some(ticket.bill_to_customer_cents));
        }
        EntryDraft::Receipt(memo) | EntryDraft::Adm(memo) => {
            row.reference_number = Set(Some(memo.reference_number.trim().to_string()));
            row.notes = Set(memo.notes);
            row.amount_cents = Set(Some(memo.amount_cents));
        }
    }

    row.insert(db).await.map_err(Into::into)
}

/// Which accounts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryScope {
    /// A single staff member's own entries
    ForUser(i32),
    /// Every account, for the admin dashboard
    All,
}

/// One row of a listing: the entry plus its owner's display identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// The ledger entry itself
    pub entry: entry::Model,
    /// Display name of the staff member who recorded it
    pub staff_name: String,
    /// Login name of the staff member who recorded it
    pub username: String,
}

/// Retrieves entries in a date range, newest first (then highest id first).
///
/// Both date bounds are inclusive. When `text_filter` is given (admin view),
/// rows are kept on a case-insensitive substring match against staff name,
/// username, ticket number, or reference number. The filter only affects
/// what is listed; outstanding balances are computed over full history
/// elsewhere and are deliberately unaffected by it.
pub async fn list_entries(
    db: &DatabaseConnection,
    scope: EntryScope,
    start: NaiveDate,
    end: NaiveDate,
    text_filter: Option<&str>,
) -> Result<Vec<ListedEntry>> {
    let mut query = Entry::find()
        .find_also_related(User)
        .filter(entry::Column::EntryDate.gte(start))
        .filter(entry::Column::EntryDate.lte(end))
        .order_by_desc(entry::Column::EntryDate)
        .order_by_desc(entry::Column::Id);

    if let EntryScope::ForUser(user_id) = scope {
        query = query.filter(entry::Column::StaffUserId.eq(user_id));
    }

    let rows = query.all(db).await?;

    let needle = text_filter
        .map(|filter| filter.trim().to_lowercase())
        .filter(|filter| !filter.is_empty());

    let mut listed = Vec::with_capacity(rows.len());
    for (row, owner) in rows {
        // The FK guarantees an owner; a miss means the store is inconsistent.
        let Some(owner) = owner else {
            return Err(Error::UserNotFound {
                id: row.staff_user_id,
            });
        };
        if let Some(needle) = &needle {
            if !matches_filter(&row, &owner, needle) {
                continue;
            }
        }
        listed.push(ListedEntry {
            entry: row,
            staff_name: owner.staff_name,
            username: owner.username,
        });
    }

    Ok(listed)
}

/// Case-insensitive substring match across the admin-searchable fields.
fn matches_filter(row: &entry::Model, owner: &user::Model, needle: &str) -> bool {
    [
        Some(owner.staff_name.as_str()),
        Some(owner.username.as_str()),
        row.ticket_number.as_deref(),
        row.reference_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        adm_draft, create_test_staff, date, receipt_draft, refund_draft, sale_draft, setup_test_db,
        ticket_draft,
    };
    use sea_orm::{DatabaseBackend, MockDatabase, PaginatorTrait};

    #[tokio::test]
    async fn test_sale_with_blank_ticket_number_is_rejected_before_any_query() -> Result<()> {
        // MockDatabase with no prepared results: any storage access would fail,
        // proving validation happens first.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut ticket = ticket_draft(100_000);
        ticket.ticket_number = "   ".to_string();

        let err = record_entry(&db, 1, date(2024, 3, 1), EntryDraft::Sale(ticket))
            .await
            .unwrap_err();
        let Error::Validation { missing_fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(missing_fields, vec!["ticket_number"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_sale_inserts_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "asha").await?;

        let mut ticket = ticket_draft(100_000);
        ticket.ticket_number = String::new();
        let result = record_entry(&db, staff.id, date(2024, 3, 1), EntryDraft::Sale(ticket)).await;

        assert!(result.is_err());
        assert_eq!(Entry::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_memo_requires_reference_and_positive_amount() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let draft = EntryDraft::Receipt(MemoDraft {
            reference_number: String::new(),
            notes: None,
            amount_cents: 0,
        });
        let err = record_entry(&db, 1, date(2024, 3, 1), draft).await.unwrap_err();
        let Error::Validation { missing_fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            missing_fields,
            vec!["reference_number", "amount (must be positive)"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_ticket_amount_is_rejected() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut ticket = ticket_draft(100_000);
        ticket.commission_cents = -1;
        let err = record_entry(&db, 1, date(2024, 3, 1), EntryDraft::Refund(ticket))
            .await
            .unwrap_err();
        let Error::Validation { missing_fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(missing_fields, vec!["commission (must be non-negative)"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_recorded_refund_keeps_amounts_non_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "asha").await?;

        let recorded =
            record_entry(&db, staff.id, date(2024, 3, 1), refund_draft(55_000)).await?;

        // Write-time negation is the other variant's strategy; this ledger
        // stores what was submitted and applies the sign at read time.
        assert_eq!(recorded.entry_type, "REFUND");
        assert_eq!(recorded.bill_to_customer_cents, Some(55_000));

        Ok(())
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive_on_both_bounds() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "asha").await?;

        record_entry(&db, staff.id, date(2024, 3, 1), sale_draft(10_000)).await?;
        record_entry(&db, staff.id, date(2024, 3, 15), sale_draft(20_000)).await?;
        record_entry(&db, staff.id, date(2024, 3, 31), sale_draft(30_000)).await?;
        record_entry(&db, staff.id, date(2024, 4, 1), sale_draft(40_000)).await?;

        let listed = list_entries(
            &db,
            EntryScope::ForUser(staff.id),
            date(2024, 3, 1),
            date(2024, 3, 31),
            None,
        )
        .await?;

        let dates: Vec<NaiveDate> = listed.iter().map(|l| l.entry.entry_date).collect();
        assert_eq!(dates, vec![date(2024, 3, 31), date(2024, 3, 15), date(2024, 3, 1)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_with_id_tiebreak() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "asha").await?;

        let first = record_entry(&db, staff.id, date(2024, 3, 10), sale_draft(10_000)).await?;
        let second = record_entry(&db, staff.id, date(2024, 3, 10), sale_draft(20_000)).await?;

        let listed = list_entries(
            &db,
            EntryScope::ForUser(staff.id),
            date(2024, 3, 1),
            date(2024, 3, 31),
            None,
        )
        .await?;

        // Same date: the later insert (higher id) lists first
        assert_eq!(listed[0].entry.id, second.id);
        assert_eq!(listed[1].entry.id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_scope_separates_accounts() -> Result<()> {
        let db = setup_test_db().await?;
        let asha = create_test_staff(&db, "asha").await?;
        let omar = create_test_staff(&db, "omar").await?;

        record_entry(&db, asha.id, date(2024, 3, 5), sale_draft(10_000)).await?;
        record_entry(&db, omar.id, date(2024, 3, 6), sale_draft(20_000)).await?;

        let asha_only = list_entries(
            &db,
            EntryScope::ForUser(asha.id),
            date(2024, 3, 1),
            date(2024, 3, 31),
            None,
        )
        .await?;
        assert_eq!(asha_only.len(), 1);
        assert_eq!(asha_only[0].username, "asha");

        let all = list_entries(&db, EntryScope::All, date(2024, 3, 1), date(2024, 3, 31), None)
            .await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_text_filter_is_case_insensitive_substring() -> Result<()> {
        let db = setup_test_db().await?;
        let asha = create_test_staff(&db, "asha").await?;
        let omar = create_test_staff(&db, "omar").await?;

        record_entry(&db, asha.id, date(2024, 3, 5), sale_draft(10_000)).await?;
        record_entry(&db, omar.id, date(2024, 3, 6), receipt_draft(5_000)).await?;
        record_entry(&db, omar.id, date(2024, 3, 7), adm_draft(2_000)).await?;

        // Matches the staff name "Staff asha" regardless of case
        let by_name = list_entries(
            &db,
            EntryScope::All,
            date(2024, 3, 1),
            date(2024, 3, 31),
            Some("ASHA"),
        )
        .await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].username, "asha");

        // Matches the memo reference number substring
        let by_reference = list_entries(
            &db,
            EntryScope::All,
            date(2024, 3, 1),
            date(2024, 3, 31),
            Some("rcpt"),
        )
        .await?;
        assert_eq!(by_reference.len(), 1);
        assert_eq!(by_reference[0].entry.entry_type, "RECEIPT");

        // A blank filter is the same as no filter
        let blank = list_entries(
            &db,
            EntryScope::All,
            date(2024, 3, 1),
            date(2024, 3, 31),
            Some("   "),
        )
        .await?;
        assert_eq!(blank.len(), 3);

        Ok(())
    }

    #[test]
    fn test_entry_type_column_round_trip() -> Result<()> {
        for entry_type in [
            EntryType::Sale,
            EntryType::Refund,
            EntryType::Receipt,
            EntryType::Adm,
        ] {
            assert_eq!(EntryType::from_column(entry_type.as_str())?, entry_type);
        }
        assert!(matches!(
            EntryType::from_column("VOID"),
            Err(Error::UnknownEntryType { .. })
        ));
        Ok(())
    }
}

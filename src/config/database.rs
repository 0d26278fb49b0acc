//! Database configuration module for `Ticketbook`.
//!
//! This module handles the `SQLite` database connection and table creation
//! using `SeaORM`. Tables are generated straight from the entity definitions
//! via `Schema::create_table_from_entity`, so the schema always matches the
//! Rust struct definitions without hand-written SQL or a migration framework.

use crate::entities::{Entry, OpeningBalance, Session, User};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Reads the mandatory `DATABASE_URL` connection secret from the environment.
///
/// Unlike optional settings this has no default: a ledger pointed at the
/// wrong store is worse than one that refuses to start.
pub fn get_database_url() -> Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| Error::Config {
        message: "DATABASE_URL is not set; add it to the environment or a .env file".to_string(),
    })
}

/// Establishes a connection to the database behind the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates tables for users, entries, opening balances, and sessions. Safe
/// to call once at startup; each statement runs independently.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let entry_table = schema.create_table_from_entity(Entry);
    let opening_balance_table = schema.create_table_from_entity(OpeningBalance);
    let session_table = schema.create_table_from_entity(Session);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&entry_table)).await?;
    db.execute(builder.build(&opening_balance_table)).await?;
    db.execute(builder.build(&session_table)).await?;

    info!("Database tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntryModel, OpeningBalanceModel, SessionModel, UserModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // A simple query proves the connection is usable
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Every table must exist and be queryable
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<EntryModel> = Entry::find().limit(1).all(&db).await?;
        let _: Vec<OpeningBalanceModel> = OpeningBalance::find().limit(1).all(&db).await?;
        let _: Vec<SessionModel> = Session::find().limit(1).all(&db).await?;

        Ok(())
    }
}

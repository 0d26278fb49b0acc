//! Configuration management for `Ticketbook`.
//!
//! The only mandatory setting is the database connection string; startup
//! fails fast with a descriptive error when it is absent.

/// Database connection and table creation
pub mod database;

use crate::errors::Result;

/// Runtime configuration resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the entry store
    pub database_url: String,
}

/// Loads the application configuration from the environment.
///
/// `DATABASE_URL` is the one connection secret this application needs; a
/// missing value is a fatal configuration error, not something to default.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_url = database::get_database_url()?;
    Ok(AppConfig { database_url })
}

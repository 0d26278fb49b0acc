//! Headless bootstrap for the `Ticketbook` store.
//!
//! Runs the application's startup sequence without any serving surface:
//! logging, environment, configuration, database connection, table
//! creation, and the one-time first-admin path driven by environment
//! variables. Exits once the store is ready.

use dotenvy::dotenv;
use std::env;
use ticketbook::{config, core::user, errors::Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration; fails fast without DATABASE_URL
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;

    // 4. Connect and ensure tables exist
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. One-time first-admin bootstrap, only while the user store is empty
    if user::users_exist(&db).await? {
        info!("Accounts already exist; the bootstrap path is closed.");
        return Ok(());
    }

    match (
        env::var("TICKETBOOK_ADMIN_USERNAME"),
        env::var("TICKETBOOK_ADMIN_PASSWORD"),
        env::var("TICKETBOOK_ADMIN_NAME"),
    ) {
        (Ok(username), Ok(password), Ok(staff_name)) => {
            let admin = user::bootstrap_admin(&db, &username, &password, &staff_name).await?;
            info!(username = %admin.username, "Created first admin account.");
        }
        _ => {
            warn!(
                "User store is empty. Set TICKETBOOK_ADMIN_USERNAME, \
                 TICKETBOOK_ADMIN_PASSWORD and TICKETBOOK_ADMIN_NAME to create the first admin."
            );
        }
    }

    Ok(())
}

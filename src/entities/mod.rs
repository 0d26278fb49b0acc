//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod entry;
pub mod opening_balance;
pub mod session;
pub mod user;

// Re-export specific types to avoid conflicts
pub use entry::{Column as EntryColumn, Entity as Entry, Model as EntryModel};
pub use opening_balance::{
    Column as OpeningBalanceColumn, Entity as OpeningBalance, Model as OpeningBalanceModel,
};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};

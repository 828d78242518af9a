//! Database plumbing and the user ledger

pub mod db;
pub mod migrations;
pub mod users;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};
pub use users::{Slot, UserIdentity, UserRecord, UserStore};

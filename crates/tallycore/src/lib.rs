//! Tally - personal expense ledger behind a conversational interface
//!
//! This library holds everything that is independent of the chat transport:
//! the persistent user ledger, the per-user conversation state machine and
//! the flows that move a user through registration and expense entry.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors and logging
//! - `storage`: Connection pool, migrations and the user ledger
//! - `conversation`: State tags, transitions, per-user locking and routing
//! - `flows`: Registration, expense entry and read-only reports
//! - `services`: Exchange rates and saving tips
//! - `messages`: User-facing texts
//! - `assistant`: Entry point that turns one inbound message into replies

pub mod assistant;
pub mod conversation;
pub mod core;
pub mod flows;
pub mod messages;
pub mod services;
pub mod storage;

// Re-export commonly used types for convenience
pub use assistant::{Assistant, InboundMessage, Reply};
pub use conversation::{MenuCommand, StateTag, MENU_LAYOUT};
pub use crate::core::{config, AppError, AppResult};
pub use storage::{create_pool, get_connection, DbConnection, DbPool, Slot, UserIdentity, UserRecord, UserStore};

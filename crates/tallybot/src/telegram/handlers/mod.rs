//! Telegram bot handler tree configuration
//!
//! The same schema is used by the dispatcher in `main` and by tests.

mod schema;
mod types;

pub use schema::{inbound_message, schema};
pub use types::{HandlerDeps, HandlerError};

//! Telegram transport: bot setup, reply keyboard and the update handler tree

pub mod bot;
pub mod handlers;
pub mod keyboard;

pub use bot::{create_bot, setup_bot_commands};
pub use handlers::{schema, HandlerDeps};

//! Per-user conversation state, its transition table and message routing

pub mod dispatcher;
pub mod registry;
pub mod state;

pub use crate::storage::Slot;
pub use dispatcher::{parse_command, route, MenuCommand, Route, MENU_LAYOUT};
pub use registry::ConversationRegistry;
pub use state::{transition, ConversationState, Event, StateTag};

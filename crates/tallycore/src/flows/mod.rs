//! Conversation flows
//!
//! Each step takes the user's locked conversation state and returns the
//! replies to send. A step never advances the state unless the write it
//! depends on has committed; errors are left to the assistant to recover.

pub mod expenses;
pub mod registration;
pub mod reports;

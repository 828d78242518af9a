//! Collects three category labels and creates the user's ledger.
//!
//! Labels are taken verbatim: empty or repeated labels are accepted.

use crate::assistant::{InboundMessage, Reply};
use crate::conversation::{ConversationState, Event};
use crate::core::error::{AppError, AppResult};
use crate::messages;
use crate::storage::{Slot, UserStore};

/// Start command: enters the flow unless a ledger already exists.
///
/// # Errors
///
/// `AppError::DuplicateIdentity` for an already registered user; the state is not touched.
pub fn begin(store: &UserStore, state: &mut ConversationState, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    if store.find_by_identity(msg.identity)?.is_some() {
        return Err(AppError::DuplicateIdentity(msg.identity));
    }

    state.apply(Event::StartRegistration)?;
    log::info!("User {} started registration", msg.identity);

    Ok(vec![
        Reply::answer(messages::greeting(&msg.display_name)),
        Reply::answer(messages::ask_category(Slot::First)),
    ])
}

/// One label step. The third label persists the ledger before leaving the flow.
pub fn accept_label(store: &UserStore, state: &mut ConversationState, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    let from = state.tag();
    let slot = from.category_slot().ok_or(AppError::InvalidTransition {
        from,
        event: Event::LabelReceived,
    })?;

    if let Some(next) = slot.next() {
        state.apply(Event::LabelReceived)?;
        state.stash(slot, msg.text.clone());
        return Ok(vec![Reply::answer(messages::ask_category(next))]);
    }

    let first = stashed_label(state, Slot::First)?;
    let second = stashed_label(state, Slot::Second)?;
    let record = store.create(msg.identity, &msg.display_name, [first, second, msg.text.clone()])?;

    state.apply(Event::LabelReceived)?;
    log::info!("User {} registered with ledger {}", msg.identity, record.id);

    Ok(vec![Reply::answer(messages::categories_saved(&record))])
}

/// Registration status button
pub fn status(store: &UserStore, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    let text = match store.find_by_identity(msg.identity)? {
        Some(_) => messages::already_registered(&msg.display_name),
        None => messages::NOT_REGISTERED_HINT.to_string(),
    };
    Ok(vec![Reply::answer(text)])
}

fn stashed_label(state: &ConversationState, slot: Slot) -> AppResult<String> {
    state
        .stashed(slot)
        .map(str::to_string)
        .ok_or(AppError::IncompleteScratch(slot))
}

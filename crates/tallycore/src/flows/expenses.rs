//! Adds one amount to each of the three totals in turn.

use crate::assistant::{InboundMessage, Reply};
use crate::conversation::{ConversationState, Event};
use crate::core::error::{AppError, AppResult};
use crate::messages;
use crate::storage::{Slot, UserStore};

/// Parses an expense amount.
///
/// Surrounding whitespace is ignored. Any finite decimal is accepted,
/// including zero and negative values.
pub fn parse_amount(text: &str) -> AppResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::InvalidNumber(text.to_string())),
    }
}

/// Finances button: shows the current totals and asks for the first amount.
///
/// # Errors
///
/// `AppError::NotFound` when the user has not registered.
pub fn begin(store: &UserStore, state: &mut ConversationState, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    let record = store
        .find_by_identity(msg.identity)?
        .ok_or(AppError::NotFound(msg.identity))?;

    state.apply(Event::OpenFinances)?;

    Ok(vec![
        Reply::answer(messages::current_expenses(&msg.display_name, &record)),
        Reply::quote(messages::ask_expense(record.category(Slot::First))),
    ])
}

/// One amount step.
///
/// An unparsable amount or a failed write leaves both the total and the
/// state as they were, so the same step is offered again.
pub fn accept_amount(store: &UserStore, state: &mut ConversationState, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    let from = state.tag();
    let slot = from.expense_slot().ok_or(AppError::InvalidTransition {
        from,
        event: Event::AmountAccepted,
    })?;

    let amount = parse_amount(&msg.text)?;
    let mut record = store
        .find_by_identity(msg.identity)?
        .ok_or(AppError::NotFound(msg.identity))?;

    let total = store.increment_total(msg.identity, slot, amount)?;
    record.totals[slot.index()] = total;
    state.apply(Event::AmountAccepted)?;
    log::info!(
        "User {} added {} to {} total, now {}",
        msg.identity,
        amount,
        slot,
        total
    );

    let category = record.category(slot);
    match slot.next() {
        Some(next) => Ok(vec![Reply::quote(messages::expense_added(
            category,
            total,
            Some(record.category(next)),
        ))]),
        None => Ok(vec![
            Reply::quote(messages::expense_added(category, total, None)),
            Reply::quote(messages::totals_summary(&msg.display_name, &record)),
        ]),
    }
}

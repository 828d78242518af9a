//! Conversation state tags and the transition table
//!
//! A user is either idle or parked in exactly one flow step. Every change of
//! tag goes through [`transition`]; pairs missing from the table are errors.

use std::collections::HashMap;

use crate::core::error::{AppError, AppResult};
use crate::storage::Slot;

/// Which flow step a user is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateTag {
    /// No flow in progress; text is matched against commands
    #[default]
    Idle,
    AwaitingCategory1,
    AwaitingCategory2,
    AwaitingCategory3,
    AwaitingExpense1,
    AwaitingExpense2,
    AwaitingExpense3,
}

impl StateTag {
    pub fn is_idle(self) -> bool {
        self == StateTag::Idle
    }

    pub fn awaiting_category(slot: Slot) -> Self {
        match slot {
            Slot::First => StateTag::AwaitingCategory1,
            Slot::Second => StateTag::AwaitingCategory2,
            Slot::Third => StateTag::AwaitingCategory3,
        }
    }

    pub fn awaiting_expense(slot: Slot) -> Self {
        match slot {
            Slot::First => StateTag::AwaitingExpense1,
            Slot::Second => StateTag::AwaitingExpense2,
            Slot::Third => StateTag::AwaitingExpense3,
        }
    }

    /// Category the registration step is collecting
    pub fn category_slot(self) -> Option<Slot> {
        match self {
            StateTag::AwaitingCategory1 => Some(Slot::First),
            StateTag::AwaitingCategory2 => Some(Slot::Second),
            StateTag::AwaitingCategory3 => Some(Slot::Third),
            _ => None,
        }
    }

    /// Total the expense step will update
    pub fn expense_slot(self) -> Option<Slot> {
        match self {
            StateTag::AwaitingExpense1 => Some(Slot::First),
            StateTag::AwaitingExpense2 => Some(Slot::Second),
            StateTag::AwaitingExpense3 => Some(Slot::Third),
            _ => None,
        }
    }
}

/// What happened in the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Start command from an unregistered user
    StartRegistration,
    /// A category label was taken (and, on the last step, persisted)
    LabelReceived,
    /// Finances menu opened by a registered user
    OpenFinances,
    /// An amount was parsed and added to its total
    AmountAccepted,
    /// Flow can not continue (record vanished, already registered)
    Abandon,
}

/// The transition table: `tag × event → next tag`.
pub fn transition(from: StateTag, event: Event) -> AppResult<StateTag> {
    use Event as E;
    use StateTag as S;

    let next = match (from, event) {
        (_, E::Abandon) => S::Idle,

        (S::Idle, E::StartRegistration) => S::AwaitingCategory1,
        (S::AwaitingCategory1, E::LabelReceived) => S::AwaitingCategory2,
        (S::AwaitingCategory2, E::LabelReceived) => S::AwaitingCategory3,
        (S::AwaitingCategory3, E::LabelReceived) => S::Idle,

        (S::Idle, E::OpenFinances) => S::AwaitingExpense1,
        (S::AwaitingExpense1, E::AmountAccepted) => S::AwaitingExpense2,
        (S::AwaitingExpense2, E::AmountAccepted) => S::AwaitingExpense3,
        (S::AwaitingExpense3, E::AmountAccepted) => S::Idle,

        (from, event) => return Err(AppError::InvalidTransition { from, event }),
    };
    Ok(next)
}

/// One user's cursor plus labels collected but not yet persisted.
///
/// `scratch` is empty whenever the tag is `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    tag: StateTag,
    scratch: HashMap<Slot, String>,
}

impl ConversationState {
    pub fn tag(&self) -> StateTag {
        self.tag
    }

    /// Moves along the transition table; the state is unchanged on error.
    pub fn apply(&mut self, event: Event) -> AppResult<StateTag> {
        let next = transition(self.tag, event)?;
        log::debug!("Conversation {:?} --{:?}--> {:?}", self.tag, event, next);
        self.tag = next;
        if next.is_idle() {
            self.scratch.clear();
        }
        Ok(next)
    }

    /// Drops any flow in progress
    pub fn reset(&mut self) {
        self.tag = StateTag::Idle;
        self.scratch.clear();
    }

    pub fn stash(&mut self, slot: Slot, value: String) {
        self.scratch.insert(slot, value);
    }

    pub fn stashed(&self, slot: Slot) -> Option<&str> {
        self.scratch.get(&slot).map(String::as_str)
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }
}

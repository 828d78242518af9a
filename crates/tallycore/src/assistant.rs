//! Turns one inbound message into the replies for that user.
//!
//! Messages of the same user are processed one at a time; the
//! conversation guard is held from routing until the last write.

use std::sync::Arc;

use crate::conversation::{route, ConversationRegistry, ConversationState, MenuCommand, Route, StateTag};
use crate::core::error::{AppError, AppResult};
use crate::flows::{expenses, registration, reports};
use crate::messages;
use crate::services::{random_tip, RateProvider};
use crate::storage::{DbPool, UserIdentity, UserStore};

/// A text message as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub identity: UserIdentity,
    pub display_name: String,
    pub text: String,
}

impl InboundMessage {
    pub fn new(identity: UserIdentity, display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identity,
            display_name: display_name.into(),
            text: text.into(),
        }
    }
}

/// Text to deliver back to the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Send as a reply quoting the user's message
    pub quote: bool,
}

impl Reply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quote: false,
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quote: true,
        }
    }
}

pub struct Assistant {
    store: UserStore,
    conversations: ConversationRegistry,
    rates: Arc<dyn RateProvider>,
}

impl Assistant {
    pub fn new(pool: Arc<DbPool>, rates: Arc<dyn RateProvider>) -> Self {
        Self {
            store: UserStore::new(pool),
            conversations: ConversationRegistry::new(),
            rates,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Current tag of a user, waiting for any message being processed
    pub async fn conversation_tag(&self, identity: UserIdentity) -> StateTag {
        self.conversations.tag(identity).await
    }

    /// Processes one message. Failures come back as advisory replies.
    pub async fn handle(&self, msg: &InboundMessage) -> Vec<Reply> {
        let mut state = self.conversations.lock(msg.identity).await;
        let route = route(state.tag(), &msg.text);
        log::debug!("User {} in {:?} routed to {:?}", msg.identity, state.tag(), route);

        let outcome = match route {
            Route::Flow(tag) if tag.expense_slot().is_some() => expenses::accept_amount(&self.store, &mut state, msg),
            Route::Flow(_) => registration::accept_label(&self.store, &mut state, msg),
            Route::Command(command) => self.run_command(command, &mut state, msg).await,
            Route::Unmatched => Ok(Vec::new()),
        };

        outcome.unwrap_or_else(|err| recover(err, &mut state, msg))
    }

    async fn run_command(
        &self,
        command: MenuCommand,
        state: &mut ConversationState,
        msg: &InboundMessage,
    ) -> AppResult<Vec<Reply>> {
        match command {
            MenuCommand::Start => registration::begin(&self.store, state, msg),
            MenuCommand::RegistrationStatus => registration::status(&self.store, msg),
            MenuCommand::ExchangeRates => Ok(vec![self.exchange_rates().await]),
            MenuCommand::SavingTips => Ok(vec![Reply::answer(random_tip())]),
            MenuCommand::PersonalFinances => expenses::begin(&self.store, state, msg),
            MenuCommand::ViewExpenses => reports::view_expenses(&self.store, msg),
        }
    }

    async fn exchange_rates(&self) -> Reply {
        match self.rates.latest().await {
            Ok(quote) => Reply::answer(messages::exchange_rates(&quote)),
            Err(err @ (AppError::HttpStatus(_) | AppError::Config(_))) => {
                log::warn!("Exchange rates unavailable: {}", err);
                Reply::answer(messages::RATES_UNAVAILABLE)
            }
            Err(err) => {
                log::warn!("Exchange rate lookup failed: {}", err);
                Reply::answer(messages::RATES_FAILED)
            }
        }
    }
}

/// Maps a flow error to the notice for the user and to what happens to the flow.
fn recover(err: AppError, state: &mut ConversationState, msg: &InboundMessage) -> Vec<Reply> {
    match err {
        AppError::DuplicateIdentity(_) => {
            state.reset();
            vec![Reply::answer(messages::already_registered(&msg.display_name))]
        }
        AppError::NotFound(_) => {
            state.reset();
            vec![Reply::answer(messages::FINANCES_NOT_FOUND)]
        }
        AppError::InvalidNumber(_) => vec![Reply::quote(messages::INVALID_NUMBER)],
        err if err.is_store_unavailable() => {
            log::error!("Store failure for user {} in {:?}: {}", msg.identity, state.tag(), err);
            vec![Reply::answer(messages::STORE_FAILURE)]
        }
        err => {
            log::error!("Dropping conversation of user {} in {:?}: {}", msg.identity, state.tag(), err);
            state.reset();
            vec![Reply::answer(messages::INTERNAL_FAILURE)]
        }
    }
}

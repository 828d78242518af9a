use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::conversation::state::{ConversationState, StateTag};
use crate::storage::UserIdentity;

/// In-memory conversation slots, one per user identity.
///
/// Holding the guard returned by [`lock`](Self::lock) serializes all
/// processing for that identity; different identities never contend.
/// Nothing is persisted, so a restart returns everyone to `Idle`.
#[derive(Default)]
pub struct ConversationRegistry {
    slots: DashMap<UserIdentity, Arc<Mutex<ConversationState>>>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a user's conversation, creating it on first use.
    pub async fn lock(&self, identity: UserIdentity) -> OwnedMutexGuard<ConversationState> {
        // The map shard lock is released before awaiting the user's mutex
        let slot = Arc::clone(&self.slots.entry(identity).or_default());
        slot.lock_owned().await
    }

    /// Current tag of a user (waits for any in-flight message to finish)
    pub async fn tag(&self, identity: UserIdentity) -> StateTag {
        let slot = match self.slots.get(&identity) {
            Some(slot) => Arc::clone(&slot),
            None => return StateTag::Idle,
        };
        let state = slot.lock().await;
        state.tag()
    }

    /// Number of users seen since start
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

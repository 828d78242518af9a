//! Handler types and dependencies

use std::sync::Arc;

use tallycore::Assistant;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub assistant: Arc<Assistant>,
}

impl HandlerDeps {
    pub fn new(assistant: Arc<Assistant>) -> Self {
        Self { assistant }
    }
}

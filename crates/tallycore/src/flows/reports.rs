use crate::assistant::{InboundMessage, Reply};
use crate::core::error::AppResult;
use crate::messages;
use crate::storage::UserStore;

/// View expenses button: read-only summary, no state change
pub fn view_expenses(store: &UserStore, msg: &InboundMessage) -> AppResult<Vec<Reply>> {
    let text = match store.find_by_identity(msg.identity)? {
        Some(record) => messages::expenses_report(&msg.display_name, &record),
        None => messages::EXPENSES_NOT_FOUND.to_string(),
    };
    Ok(vec![Reply::answer(text)])
}

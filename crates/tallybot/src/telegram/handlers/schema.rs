//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Message, ReplyParameters};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::keyboard::main_menu;
use tallycore::{InboundMessage, Reply, UserIdentity};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Only text messages with a sender reach the assistant; everything else
/// falls through the tree and is dropped by the dispatcher.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().branch(text_message_handler(deps))
}

/// Converts a Telegram message into the transport-free form.
///
/// Returns `None` for messages without text or without a sender.
pub fn inbound_message(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?;
    let user = msg.from.as_ref()?;
    let identity = i64::try_from(user.id.0).ok()?;

    Some(InboundMessage::new(UserIdentity(identity), user.full_name(), text))
}

fn text_message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| inbound_message(&msg))
        .endpoint(move |bot: Bot, msg: Message, inbound: InboundMessage| {
            let deps = deps.clone();
            async move {
                let replies = deps.assistant.handle(&inbound).await;
                send_replies(&bot, &msg, replies).await;
                Ok(())
            }
        })
}

/// Sends replies in order with the main menu attached.
///
/// A failed send is logged and does not stop the remaining replies;
/// the ledger has already been updated at this point.
async fn send_replies(bot: &Bot, msg: &Message, replies: Vec<Reply>) {
    for reply in replies {
        let mut request = bot.send_message(msg.chat.id, reply.text).reply_markup(main_menu());
        if reply.quote {
            request = request.reply_parameters(ReplyParameters::new(msg.id));
        }

        if let Err(e) = request.await {
            log::error!("Failed to send reply to chat {}: {}", msg.chat.id, e);
        }
    }
}

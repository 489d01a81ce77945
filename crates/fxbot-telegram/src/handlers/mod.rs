//! Telegram update handlers.
//!
//! One handler: each text message is parsed and dispatched by the core, and
//! the resulting reply (text or chart photo) is transmitted back to the
//! originating chat. Non-text updates are ignored.

use std::sync::Arc;

use teloxide::prelude::*;

use fxbot_core::{
    dispatcher::Reply,
    domain::{ChatId, UserId},
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let user_id = UserId(user.id.0 as i64);

    let reply = state.dispatcher.dispatch(user_id, text).await;

    let sent = match reply {
        Reply::Text {
            html,
            keyboard: None,
        } => state.messenger.send_html(chat_id, &html).await,
        Reply::Text {
            html,
            keyboard: Some(kb),
        } => {
            state
                .messenger
                .send_html_with_keyboard(chat_id, &html, kb)
                .await
        }
        Reply::Photo { png, caption } => {
            state
                .messenger
                .send_photo(chat_id, png, Some(&caption))
                .await
        }
    };

    if let Err(e) = sent {
        tracing::warn!(error = %e, chat = chat_id.0, "failed to deliver reply");
    }

    Ok(())
}

use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::ReplyKeyboard,
    Result,
};

/// Outbound-messaging port.
///
/// Telegram is the first implementation; the shape stays messenger-agnostic
/// so the core never sees transport types.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    async fn send_html_with_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: ReplyKeyboard,
    ) -> Result<MessageRef>;

    /// Send a finished PNG from memory; no file handle crosses this port.
    async fn send_photo(
        &self,
        chat_id: ChatId,
        png: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<MessageRef>;
}

//! Hexagonal ports. Telegram is the first adapter; the traits are the seams
//! where another messenger or a persisted subscription store would plug in.

use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Outbound messaging port.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Deliver one HTML message to one chat. A rejected or failed send is an
    /// error; the caller decides whether the batch continues.
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<()>;
}

/// Source of broadcast recipients.
///
/// The polling implementation derives the list from the bot's recent inbound
/// updates; a durable subscription store can replace it behind the same
/// contract without touching the dispatcher.
#[async_trait]
pub trait SubscriberRegistry: Send + Sync {
    /// Deduplicated recipients in first-seen order. Implementations report
    /// discovery problems as an empty list, not an error; an empty list is
    /// the caller's signal that there is nobody to notify.
    async fn list(&self) -> Result<Vec<ChatId>>;
}

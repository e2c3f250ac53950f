//! Telegram adapter (teloxide).
//!
//! Implements the rrb-core messaging and subscriber-registry ports over the
//! Telegram Bot API.

use std::collections::HashSet;

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ParseMode, Update, UpdateKind},
};
use tokio::time::sleep;

use rrb_core::{
    domain::ChatId,
    errors::Error,
    ports::{MessagingPort, SubscriberRegistry},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .send_message(Self::tg_chat(chat_id), html.to_string())
                .parse_mode(ParseMode::Html)
                .disable_web_page_preview(true)
        })
        .await?;
        Ok(())
    }
}

/// Subscriber discovery over `getUpdates`.
///
/// "Subscribers" are the chats of recent human senders: a bounded window of
/// the bot's update queue, not a durable subscription store. Anything that
/// keeps the window from being read (network failure, a non-ok response)
/// yields an empty list; the pipeline decides whether that is fatal.
pub struct UpdatesRegistry {
    bot: Bot,
    limit: u8,
}

impl UpdatesRegistry {
    pub fn new(bot: Bot, limit: u8) -> Self {
        Self { bot, limit }
    }
}

#[async_trait]
impl SubscriberRegistry for UpdatesRegistry {
    async fn list(&self) -> Result<Vec<ChatId>> {
        let updates = match self.bot.get_updates().limit(self.limit).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!(error = %err, "getUpdates failed, treating as no subscribers");
                return Ok(Vec::new());
            }
        };
        Ok(human_chats(&updates))
    }
}

/// Chat ids of updates whose message sender is a human, deduplicated in
/// first-seen order.
fn human_chats(updates: &[Update]) -> Vec<ChatId> {
    let mut seen = HashSet::new();
    let mut chats = Vec::new();

    for update in updates {
        let UpdateKind::Message(message) = &update.kind else {
            continue;
        };
        let Some(from) = message.from() else {
            continue;
        };
        if from.is_bot {
            continue;
        }
        let id = message.chat.id.0;
        if seen.insert(id) {
            chats.push(ChatId(id));
        }
    }

    chats
}

use std::sync::Arc;

use teloxide::prelude::*;

use rrb_core::{config::Config, dispatch::TokioSleeper, relay::Relay};
use rrb_server::AppState;
use rrb_telegram::{TelegramMessenger, UpdatesRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rrb_core::logging::init("rrb")?;

    let cfg = Config::load()?;

    let bot = Bot::new(cfg.telegram_bot_token.clone());
    // Best-effort startup check; the token is only proven valid on first use.
    match bot.get_me().await {
        Ok(me) => tracing::info!(username = me.username(), "relay bot ready"),
        Err(err) => tracing::warn!(error = %err, "getMe failed at startup"),
    }

    let relay = Relay::new(
        Arc::new(UpdatesRegistry::new(bot.clone(), cfg.discovery_limit)),
        Arc::new(TelegramMessenger::new(bot)),
        Arc::new(TokioSleeper),
        cfg.style,
        cfg.segment_limit,
        cfg.pacing,
    );

    let app = rrb_server::router(AppState {
        relay: Arc::new(relay),
    });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

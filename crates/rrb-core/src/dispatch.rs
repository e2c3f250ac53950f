//! Serial fan-out of message segments to every recipient.
//!
//! One sequential loop, recipients in discovery order, segments in order per
//! recipient. Pacing between sends is the only concession to Telegram's burst
//! limits; there is no adaptive backoff and no retry at this layer.

use std::time::Duration;

use async_trait::async_trait;

use crate::{domain::ChatId, ports::MessagingPort};

/// Fixed pauses applied while broadcasting.
#[derive(Clone, Copy, Debug)]
pub struct BroadcastPacing {
    /// Pause between consecutive segments sent to the same recipient.
    pub inter_segment: Duration,
    /// Pause after finishing one recipient, before the next.
    pub inter_recipient: Duration,
}

impl Default for BroadcastPacing {
    fn default() -> Self {
        Self {
            inter_segment: Duration::from_millis(1000),
            inter_recipient: Duration::from_millis(100),
        }
    }
}

/// Clock seam for the dispatcher. Tests substitute a recording no-op so the
/// pacing schedule can be asserted without real timers.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Aggregate outcome of one broadcast. Callers learn counts only, never
/// which recipient failed; failures are logged here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: usize,
}

/// Terminal state of one recipient's send sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeliveryStatus {
    Sent,
    Failed,
}

/// Send every segment, in order, to every recipient, in order.
///
/// A failed send aborts the remaining segments for that recipient only; the
/// outer loop always continues. Per-recipient errors end up in the tally,
/// not in a `Result`.
pub async fn broadcast(
    messenger: &dyn MessagingPort,
    sleeper: &dyn Sleeper,
    pacing: BroadcastPacing,
    recipients: &[ChatId],
    segments: &[String],
) -> DispatchReport {
    let mut report = DispatchReport {
        attempted: recipients.len(),
        delivered: 0,
    };

    for &chat_id in recipients {
        match deliver_to(messenger, sleeper, pacing, chat_id, segments).await {
            DeliveryStatus::Sent => report.delivered += 1,
            DeliveryStatus::Failed => {}
        }
        sleeper.sleep(pacing.inter_recipient).await;
    }

    report
}

async fn deliver_to(
    messenger: &dyn MessagingPort,
    sleeper: &dyn Sleeper,
    pacing: BroadcastPacing,
    chat_id: ChatId,
    segments: &[String],
) -> DeliveryStatus {
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            sleeper.sleep(pacing.inter_segment).await;
        }
        if let Err(err) = messenger.send_html(chat_id, segment).await {
            tracing::warn!(
                chat_id = chat_id.0,
                segment = i,
                error = %err,
                "send failed, skipping recipient's remaining segments"
            );
            return DeliveryStatus::Failed;
        }
    }
    DeliveryStatus::Sent
}

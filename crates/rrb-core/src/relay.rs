//! The one-invocation pipeline: discover subscribers, render the report,
//! chunk it, broadcast it. No state survives an invocation.

use std::sync::Arc;

use crate::{
    chunker,
    dispatch::{self, BroadcastPacing, DispatchReport, Sleeper},
    formatting,
    locale::ReportStyle,
    ports::{MessagingPort, SubscriberRegistry},
    submission::Submission,
    Error, Result,
};

/// Wired-up relay. Cheap to clone via the `Arc`s in an application state.
pub struct Relay {
    registry: Arc<dyn SubscriberRegistry>,
    messenger: Arc<dyn MessagingPort>,
    sleeper: Arc<dyn Sleeper>,
    style: ReportStyle,
    segment_limit: usize,
    pacing: BroadcastPacing,
}

impl Relay {
    pub fn new(
        registry: Arc<dyn SubscriberRegistry>,
        messenger: Arc<dyn MessagingPort>,
        sleeper: Arc<dyn Sleeper>,
        style: ReportStyle,
        segment_limit: usize,
        pacing: BroadcastPacing,
    ) -> Self {
        Self {
            registry,
            messenger,
            sleeper,
            style,
            segment_limit,
            pacing,
        }
    }

    /// Broadcast one submission to every current subscriber.
    ///
    /// Fails fast when discovery finds nobody; individual delivery failures
    /// only lower the report's `delivered` count.
    pub async fn run(&self, submission: &Submission) -> Result<DispatchReport> {
        let recipients = self.registry.list().await?;
        if recipients.is_empty() {
            return Err(Error::NoSubscribers);
        }

        let report = formatting::render_report(submission, &self.style);
        let segments = chunker::split_report(&report, &self.style, self.segment_limit);

        tracing::info!(
            recipients = recipients.len(),
            segments = segments.len(),
            "broadcasting submission"
        );

        Ok(dispatch::broadcast(
            self.messenger.as_ref(),
            self.sleeper.as_ref(),
            self.pacing,
            &recipients,
            &segments,
        )
        .await)
    }
}

use std::time::Duration;

use review_common::clock::Clock;
use review_common::config::CursorPolicy;
use review_common::error::PollError;
use review_common::types::Cursor;
use review_engine::dedup::FailureDeduplicator;
use review_engine::validator::{self, ValidatedResponse};
use review_notifier::{MessageSender, Notifier};

use crate::fetcher::HomeworkSource;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response validated into this many status-change messages. Each
    /// was handed to the notifier; delivery itself is best-effort.
    Validated(usize),
    /// The cycle failed. `notified` is false when the failure repeated the
    /// previous one and was only logged.
    Failed { kind: &'static str, notified: bool },
}

/// Polls the homework API forever and relays status changes to the chat.
///
/// Owns the fetch cursor and the last relayed failure; nothing else touches
/// them, so the loop needs no locking.
pub struct PollLoop<F, S, C> {
    source: F,
    notifier: Notifier<S>,
    clock: C,
    cursor: Cursor,
    failures: FailureDeduplicator,
    retry_time: Duration,
    cursor_policy: CursorPolicy,
}

impl<F, S, C> PollLoop<F, S, C>
where
    F: HomeworkSource,
    S: MessageSender,
    C: Clock,
{
    /// The initial cursor is the clock's current time.
    pub fn new(source: F, notifier: Notifier<S>, clock: C, retry_time: Duration) -> Self {
        let cursor = clock.now();
        Self {
            source,
            notifier,
            clock,
            cursor,
            failures: FailureDeduplicator::new(),
            retry_time,
            cursor_policy: CursorPolicy::default(),
        }
    }

    pub fn with_cursor_policy(mut self, policy: CursorPolicy) -> Self {
        self.cursor_policy = policy;
        self
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.failures.last()
    }

    /// Run cycles forever, sleeping `retry_time` after every one of them.
    pub async fn run(mut self) {
        tracing::info!(
            cursor = %self.cursor,
            retry_time_secs = self.retry_time.as_secs(),
            cursor_policy = ?self.cursor_policy,
            "Poll loop started"
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.retry_time).await;
        }
    }

    /// One fetch → validate → notify cycle, or the failure path. Never sleeps.
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(ValidatedResponse { messages, cursor }) => {
                tracing::debug!(from = %self.cursor, to = %cursor, "Cursor advanced");
                self.cursor = cursor;
                self.failures.clear();
                for message in &messages {
                    self.notifier.notify(message).await;
                }
                CycleOutcome::Validated(messages.len())
            }
            Err(e) => self.handle_failure(e).await,
        }
    }

    async fn poll_once(&self) -> Result<ValidatedResponse, PollError> {
        let raw = self.source.fetch(Some(self.cursor)).await?;
        validator::validate(&raw)
    }

    async fn handle_failure(&mut self, error: PollError) -> CycleOutcome {
        let kind = error.kind();
        let message = error.to_string();
        tracing::error!(kind, error = %message, "Poll cycle failed");

        let notified = self.failures.should_notify(&message);
        if notified {
            self.notifier.notify(&message).await;
        }

        if self.cursor_policy == CursorPolicy::Reset {
            self.cursor = self.clock.now();
        }

        CycleOutcome::Failed { kind, notified }
    }
}

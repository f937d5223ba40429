//! Notification delivery to the single configured chat.
//!
//! `MessageSender` is the transport seam; `TelegramSender` implements it over
//! the Telegram Bot API. `Notifier` wraps any sender and makes delivery
//! best-effort: failures are logged and never returned to the caller.

use async_trait::async_trait;
use thiserror::Error;

pub mod telegram;

pub use telegram::TelegramSender;

/// Delivery failures reported by a `MessageSender`.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rejected by messaging API (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Delivers a plain-text message to the fixed recipient.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Best-effort wrapper around a `MessageSender`.
pub struct Notifier<S> {
    sender: S,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    /// Send `message`, logging the outcome. Never fails.
    pub async fn notify(&self, message: &str) {
        match self.sender.send(message).await {
            Ok(()) => tracing::info!(text = message, "Notification delivered"),
            Err(e) => tracing::error!(text = message, error = %e, "Notification delivery failed"),
        }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FlakySender {
        fail: bool,
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageSender for FlakySender {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            self.attempts.lock().unwrap().push(text.to_string());
            if self.fail {
                Err(NotifyError::Rejected {
                    status: 400,
                    description: "Bad Request: chat not found".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_notify_delivers() {
        let notifier = Notifier::new(FlakySender {
            fail: false,
            attempts: Mutex::new(Vec::new()),
        });
        notifier.notify("hello").await;
        assert_eq!(*notifier.sender().attempts.lock().unwrap(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_notify_swallows_delivery_failure() {
        let notifier = Notifier::new(FlakySender {
            fail: true,
            attempts: Mutex::new(Vec::new()),
        });
        // Returns normally even though the sender failed
        notifier.notify("first").await;
        notifier.notify("second").await;
        assert_eq!(
            *notifier.sender().attempts.lock().unwrap(),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_rejected_display() {
        let err = NotifyError::Rejected {
            status: 403,
            description: "Forbidden: bot was blocked by the user".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rejected by messaging API (HTTP 403): Forbidden: bot was blocked by the user"
        );
    }
}

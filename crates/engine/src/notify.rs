//! Notification port.
//!
//! The engine hands finished-operation messages to a bounded queue drained by
//! a background dispatcher; delivery is simulated by the default [`Notifier`]
//! and never fails the operation that produced the message.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::EngineError;

/// Queue depth used when the caller does not configure one.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }
}

impl TryFrom<&str> for Channel {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            other => Err(EngineError::CorruptRecord(format!(
                "invalid notification channel: {other}"
            ))),
        }
    }
}

/// A single outbound message addressed to one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub channel: Channel,
    pub address: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery transport. Implementations must not block for long; the
/// dispatcher runs them on the runtime one at a time.
pub trait Notifier: Send + Sync {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Simulated transport: writes the would-be delivery to the log.
///
/// Replace with an SMTP/SMS-gateway implementation for real delivery.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        match notification.channel {
            Channel::Email => tracing::info!(
                "Sending email to {}: {}",
                notification.address,
                notification.message
            ),
            Channel::Sms => tracing::info!(
                "Sending SMS to {}: {}",
                notification.address,
                notification.message
            ),
        }
        Ok(())
    }
}

/// Sending half of the notification queue, cheap to clone into the engine.
#[derive(Clone, Debug)]
pub struct NotificationSender {
    tx: mpsc::Sender<Notification>,
}

impl NotificationSender {
    /// Spawns the dispatcher task and returns the sending handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(notifier: Arc<dyn Notifier>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel(capacity);
        tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(err) = notifier.deliver(&notification) {
                    tracing::warn!("notification delivery failed: {err}");
                }
            }
        });
        Self { tx }
    }

    /// Enqueues without blocking the caller.
    ///
    /// A full or closed queue drops the notification with a warning; dispatch
    /// never fails the operation that produced the message.
    pub fn push(&self, notification: Notification) {
        if let Err(err) = self.tx.try_send(notification) {
            tracing::warn!("notification dropped: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<Notification>>);

    impl Notifier for Recording {
        fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn channel_round_trips_canonical_strings() {
        assert_eq!(Channel::try_from("email").unwrap(), Channel::Email);
        assert_eq!(Channel::try_from("sms").unwrap(), Channel::Sms);
        assert_eq!(Channel::Email.as_str(), "email");
        assert!(Channel::try_from("pigeon").is_err());
    }

    #[tokio::test]
    async fn dispatcher_delivers_enqueued_notifications() {
        let recording = Arc::new(Recording(Mutex::new(Vec::new())));
        let sender = NotificationSender::spawn(recording.clone(), 8);

        sender.push(Notification {
            channel: Channel::Email,
            address: "someone@example.com".to_string(),
            message: "hello".to_string(),
        });

        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let seen = recording.0.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].channel, Channel::Email);
    }
}

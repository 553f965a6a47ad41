//! Best-effort delivery of notifications.
//!
//! Every notification in a batch is attempted independently and bounded by a
//! per-message timeout. Failures are logged and swallowed: a notification
//! never fails or rolls back the operation that triggered it, and it is never
//! retried.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::Notification;
use crate::domain::ports::{Mailer, MailerError};

/// Default bound on a single send.
pub const DEFAULT_MAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Counts of a dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Sends the mailer accepted within the timeout.
    pub delivered: usize,
    /// Sends that failed or timed out.
    pub failed: usize,
}

/// Fire-and-forget notification sender.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    timeout: Duration,
}

impl NotificationDispatcher {
    /// Create a dispatcher bounding each send by `timeout`.
    pub fn new(mailer: Arc<dyn Mailer>, timeout: Duration) -> Self {
        Self { mailer, timeout }
    }

    /// Attempt every notification concurrently and report the outcome.
    pub async fn dispatch(&self, notifications: Vec<Notification>) -> DispatchReport {
        let attempts = notifications.iter().map(|notification| self.attempt(notification));
        join_all(attempts)
            .await
            .into_iter()
            .fold(DispatchReport::default(), |mut report, delivered| {
                if delivered {
                    report.delivered += 1;
                } else {
                    report.failed += 1;
                }
                report
            })
    }

    async fn attempt(&self, notification: &Notification) -> bool {
        match tokio::time::timeout(self.timeout, self.mailer.send(notification)).await {
            Ok(Ok(())) => {
                debug!(to = %notification.to, subject = %notification.subject, "notification sent");
                true
            }
            Ok(Err(MailerError::NotConfigured)) => {
                warn!(
                    to = %notification.to,
                    subject = %notification.subject,
                    "mail relay not configured; notification skipped"
                );
                false
            }
            Ok(Err(error)) => {
                warn!(
                    to = %notification.to,
                    subject = %notification.subject,
                    %error,
                    "notification failed"
                );
                false
            }
            Err(_) => {
                warn!(
                    to = %notification.to,
                    subject = %notification.subject,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "notification timed out"
                );
                false
            }
        }
    }
}

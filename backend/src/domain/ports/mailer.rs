//! Port for the outbound mail relay.

use async_trait::async_trait;

use crate::domain::Notification;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mailer adapters.
    pub enum MailerError {
        /// Relay credentials are not configured; nothing was sent.
        NotConfigured => "mail relay credentials are not configured",
        /// The message could not be assembled.
        InvalidMessage { message: String } => "mail message invalid: {message}",
        /// The relay refused or failed to accept the message.
        Delivery { message: String } => "mail delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single HTML email.
    async fn send(&self, notification: &Notification) -> Result<(), MailerError>;
}

//! Lettre-backed SMTP mailer.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::Notification;
use crate::domain::ports::{Mailer, MailerError};

/// Relay location and credentials. Mail is sent from `username`.
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Zeroizing<String>,
    pub timeout: Duration,
}

/// Mailer relaying through an authenticated STARTTLS SMTP server.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer for `config`. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::InvalidMessage`] when the username is not a valid
    /// sender address and [`MailerError::Delivery`] when the relay host is
    /// unusable.
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let from = parse_mailbox(&config.username)?;
        let credentials = Credentials::new(config.username.clone(), config.password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|err| MailerError::delivery(format!("invalid relay {}: {err}", config.host)))?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(config.timeout))
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError> {
        let message = build_message(&self.from, notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|err| MailerError::delivery(err.to_string()))?;
        debug!(to = %notification.to, subject = %notification.subject, "email relayed");
        Ok(())
    }
}

/// Mailer used when relay credentials are not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _notification: &Notification) -> Result<(), MailerError> {
        Err(MailerError::not_configured())
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, MailerError> {
    raw.parse::<Mailbox>()
        .map_err(|err| MailerError::invalid_message(format!("invalid address `{raw}`: {err}")))
}

fn build_message(from: &Mailbox, notification: &Notification) -> Result<Message, MailerError> {
    let to = parse_mailbox(notification.to.as_ref())?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(notification.html_body.clone())
        .map_err(|err| MailerError::invalid_message(err.to_string()))
}

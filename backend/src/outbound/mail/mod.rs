//! Mailer adapters.
//!
//! `SmtpMailer` relays HTML mail over an authenticated STARTTLS session.
//! `DisabledMailer` stands in when relay credentials are absent so callers
//! log a `NotConfigured` failure instead of crashing.

mod smtp;

pub use smtp::{DisabledMailer, SmtpConfig, SmtpMailer};

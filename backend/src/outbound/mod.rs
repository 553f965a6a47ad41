//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **identity**: OAuth authorization-code client for customer login
//! - **payments**: Razorpay orders client for opening payment intents
//! - **mail**: SMTP relay for notification emails
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
pub mod mail;
pub mod payments;
pub mod persistence;

//! Port for storing contact-form inquiries.

use async_trait::async_trait;

use crate::domain::Contact;

use super::define_port_error;

define_port_error! {
    /// Errors raised by inquiry repository adapters.
    pub enum InquiryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "inquiry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "inquiry repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist a contact inquiry.
    async fn insert(&self, contact: &Contact) -> Result<(), InquiryPersistenceError>;

    /// Every contact inquiry, oldest first.
    async fn list_all(&self) -> Result<Vec<Contact>, InquiryPersistenceError>;
}

//! Port for the external identity collaborator.
//!
//! Adapters hide the authorization-code protocol; the domain only asks for a
//! redirect URL and later exchanges the returned code for a verified profile.

use async_trait::async_trait;

use crate::domain::IdentityProfile;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider refused the code exchange or profile read.
        Rejected { message: String } => "identity provider rejected request: {message}",
        /// The provider could not be reached.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// The returned profile lacked required fields.
        IncompleteProfile { message: String } => "identity profile incomplete: {message}",
        /// The adapter is misconfigured (for example an unparsable endpoint).
        Configuration { message: String } => "identity provider misconfigured: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Build the provider URL that starts a login carrying `state`.
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError>;

    /// Exchange an authorization code for the caller's verified profile.
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityProviderError>;
}

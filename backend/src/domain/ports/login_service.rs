//! Driving port for the identity handshake.
//!
//! Inbound adapters call it to start and finish a login without knowing the
//! identity collaborator or the user store behind it.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCallback, LoginError, LoginRedirect};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Start a login: produce the provider redirect and its `state`.
    fn begin_login(&self) -> Result<LoginRedirect, Error>;

    /// Finish a login: verify the callback, exchange the code and ensure the
    /// local user record exists.
    async fn complete_login(&self, callback: LoginCallback)
    -> Result<AuthenticatedUser, LoginError>;
}

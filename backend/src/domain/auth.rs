//! Authentication primitives for the identity handshake.
//!
//! The handshake is an authorization-code redirect: [`LoginRedirect`] carries
//! the provider URL and the anti-forgery `state`, [`LoginCallback`] carries
//! what the provider sends back, and a successful exchange yields the
//! [`AuthenticatedUser`] stored in the session.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{EmailAddress, Role, User};

/// Identity carried by an authenticated session.
///
/// Serialised into the session cookie as `{name, email, picture, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Display name.
    pub name: String,
    /// Email address; the natural key for order ownership.
    pub email: EmailAddress,
    /// Optional profile picture URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Role recorded when the user row was created.
    pub role: Role,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name().to_owned(),
            email: user.email().clone(),
            picture: user.picture().map(str::to_owned),
            role: user.role(),
        }
    }
}

/// Redirect directive produced when a login begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    /// Fully formed authorization URL at the identity collaborator.
    pub authorization_url: String,
    /// Opaque anti-forgery value that must round-trip through the provider.
    pub state: String,
}

/// Parameters delivered to the callback endpoint.
///
/// The authorization code is single use but still a bearer secret, so it is
/// wiped from memory on drop.
#[derive(Clone, Default)]
pub struct LoginCallback {
    code: Option<Zeroizing<String>>,
    state: Option<String>,
    expected_state: Option<String>,
}

impl LoginCallback {
    /// Build a callback from query parameters and the state stashed in the
    /// session when the login began.
    pub fn new(
        code: Option<String>,
        state: Option<String>,
        expected_state: Option<String>,
    ) -> Self {
        Self {
            code: code
                .filter(|value| !value.trim().is_empty())
                .map(Zeroizing::new),
            state,
            expected_state,
        }
    }

    /// Authorization code, if the provider supplied one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().map(|code| code.as_str())
    }

    /// Whether the returned state matches the one issued at login start.
    ///
    /// Both values must be present and equal.
    pub fn state_matches(&self) -> bool {
        matches!(
            (&self.state, &self.expected_state),
            (Some(returned), Some(expected)) if !expected.is_empty() && returned == expected
        )
    }
}

impl fmt::Debug for LoginCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCallback")
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .field("state", &self.state)
            .field("expected_state", &self.expected_state)
            .finish()
    }
}

/// Typed failure of the identity handshake.
///
/// Messages are for logs only; the HTTP adapter answers every variant with a
/// fixed user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// The provider redirected back without an authorization code.
    #[error("authorization code missing from callback")]
    MissingCode,
    /// The returned `state` did not match the one issued for this session.
    #[error("login state mismatch")]
    StateMismatch,
    /// The provider rejected the code exchange or profile read.
    #[error("identity provider rejected the handshake: {0}")]
    ProviderRejected(String),
    /// The provider profile lacked a required field.
    #[error("identity profile incomplete: {0}")]
    ProfileIncomplete(String),
    /// The local user record could not be read or created.
    #[error("user persistence failed: {0}")]
    Persistence(String),
}

//! Identity session manager.
//!
//! Turns a completed identity handshake into a local user record and the
//! identity stored in the session. A user is created at most once per email;
//! later logins reuse the stored row without touching its id or role.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{IdentityProvider, IdentityProviderError, LoginService, UserRepository};
use crate::domain::{
    AuthenticatedUser, EmailAddress, Error, LoginCallback, LoginError, LoginRedirect, Role, User,
};

/// Login service backed by an identity collaborator and the user store.
#[derive(Clone)]
pub struct IdentityLoginService<U> {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<U>,
    operator: EmailAddress,
    clock: Arc<dyn Clock>,
}

impl<U> IdentityLoginService<U> {
    /// Create the service. `operator` is granted the admin role when its user
    /// row is first created.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        users: Arc<U>,
        operator: EmailAddress,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            users,
            operator,
            clock,
        }
    }

    fn role_for(&self, email: &EmailAddress) -> Role {
        if email == &self.operator {
            Role::Admin
        } else {
            Role::User
        }
    }
}

fn map_provider_error(error: IdentityProviderError) -> LoginError {
    match error {
        IdentityProviderError::IncompleteProfile { message } => {
            LoginError::ProfileIncomplete(message)
        }
        other => LoginError::ProviderRejected(other.to_string()),
    }
}

#[async_trait]
impl<U> LoginService for IdentityLoginService<U>
where
    U: UserRepository,
{
    fn begin_login(&self) -> Result<LoginRedirect, Error> {
        let state = Uuid::new_v4().simple().to_string();
        let authorization_url = self
            .identity
            .authorization_url(&state)
            .map_err(|err| Error::internal(format!("cannot start login: {err}")))?;
        Ok(LoginRedirect {
            authorization_url,
            state,
        })
    }

    async fn complete_login(
        &self,
        callback: LoginCallback,
    ) -> Result<AuthenticatedUser, LoginError> {
        if !callback.state_matches() {
            return Err(LoginError::StateMismatch);
        }
        let code = callback.code().ok_or(LoginError::MissingCode)?;
        let profile = self
            .identity
            .exchange_code(code)
            .await
            .map_err(map_provider_error)?;

        let existing = self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(|err| LoginError::Persistence(err.to_string()))?;
        if let Some(user) = existing {
            return Ok(AuthenticatedUser::from(&user));
        }

        let role = self.role_for(&profile.email);
        let candidate = User::register(profile, role, self.clock.utc());
        let stored = self
            .users
            .insert_if_absent(&candidate)
            .await
            .map_err(|err| LoginError::Persistence(err.to_string()))?;
        if stored.id() == candidate.id() {
            info!(user_id = %stored.id(), role = stored.role().as_str(), "user registered");
        } else {
            warn!(email = %stored.email(), "concurrent first login; reusing stored user");
        }
        Ok(AuthenticatedUser::from(&stored))
    }
}

#[cfg(test)]
#[path = "login_service_tests.rs"]
mod tests;

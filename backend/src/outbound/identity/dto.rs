//! DTOs for the token and userinfo responses.

use serde::Deserialize;

use crate::domain::IdentityProfile;
use crate::domain::ports::IdentityProviderError;

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
}

/// OpenID Connect userinfo payload.
///
/// OIDC endpoints report the subject as `sub`; the older Google v1 endpoint
/// uses `id`. Either is accepted.
#[derive(Debug, Deserialize)]
pub(super) struct UserInfoDto {
    #[serde(alias = "id")]
    pub(super) sub: Option<String>,
    pub(super) name: Option<String>,
    pub(super) email: Option<String>,
    pub(super) picture: Option<String>,
}

/// Error body returned by token endpoints (`RFC 6749` section 5.2).
#[derive(Debug, Deserialize)]
pub(super) struct OAuthErrorDto {
    pub(super) error: String,
    pub(super) error_description: Option<String>,
}

impl UserInfoDto {
    pub(super) fn into_profile(self) -> Result<IdentityProfile, IdentityProviderError> {
        let missing = |field: &str| {
            IdentityProviderError::incomplete_profile(format!("userinfo is missing `{field}`"))
        };
        let sub = self.sub.ok_or_else(|| missing("sub"))?;
        let name = self.name.ok_or_else(|| missing("name"))?;
        let email = self.email.ok_or_else(|| missing("email"))?;
        IdentityProfile::try_from_parts(&sub, &name, &email, self.picture)
            .map_err(|err| IdentityProviderError::incomplete_profile(err.to_string()))
    }
}

impl OAuthErrorDto {
    pub(super) fn describe(&self) -> String {
        match self.error_description.as_deref() {
            Some(description) if !description.trim().is_empty() => {
                format!("{}: {}", self.error, description.trim())
            }
            _ => self.error.clone(),
        }
    }
}

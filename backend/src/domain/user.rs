//! User identity model.
//!
//! A user is created at most once per distinct email, on the first successful
//! identity handshake. Only the role is ever considered mutable, and this
//! crate never changes it after creation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like `local@domain`.
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    /// The identity collaborator did not provide a subject identifier.
    #[error("external identity id must not be empty")]
    EmptyExternalId,
    /// Display name was blank once trimmed.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Stored role text did not match a known role.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Stable internal user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address used as the natural key for users and order ownership.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - Contains exactly one `@` with non-empty text on both sides.
///
/// Comparison is exact; the identity collaborator already returns a
/// canonical address.
///
/// # Examples
/// ```
/// use studio_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new(" a@x.com ").unwrap();
/// assert_eq!(email.as_ref(), "a@x.com");
/// assert!(EmailAddress::new("nobody").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "a@x.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorisation role attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    User,
    /// Operator allowed to read the admin snapshot.
    Admin,
}

impl Role {
    /// Storage and session representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Verified profile returned by the identity collaborator after a handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    /// Subject identifier issued by the identity collaborator.
    pub external_id: String,
    /// Display name as reported by the collaborator.
    pub name: String,
    /// Verified email address.
    pub email: EmailAddress,
    /// Optional profile picture URL.
    pub picture: Option<String>,
}

impl IdentityProfile {
    /// Validate raw profile fields from the collaborator.
    pub fn try_from_parts(
        external_id: &str,
        name: &str,
        email: &str,
        picture: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(UserValidationError::EmptyExternalId);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self {
            external_id: external_id.to_owned(),
            name: name.to_owned(),
            email: EmailAddress::new(email)?,
            picture: picture.filter(|value| !value.trim().is_empty()),
        })
    }
}

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    external_id: String,
    display_name: String,
    email: EmailAddress,
    picture: Option<String>,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Raw parts used to rebuild a [`User`] from storage.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub external_id: String,
    pub display_name: String,
    pub email: EmailAddress,
    pub picture: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build the record created on a first login.
    pub fn register(profile: IdentityProfile, role: Role, created_at: DateTime<Utc>) -> Self {
        let IdentityProfile {
            external_id,
            name,
            email,
            picture,
        } = profile;
        Self {
            id: UserId::random(),
            external_id,
            display_name: name,
            email,
            picture,
            role,
            created_at,
        }
    }

    /// Rebuild a user from stored parts.
    pub fn restore(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            external_id,
            display_name,
            email,
            picture,
            role,
            created_at,
        } = draft;
        Self {
            id,
            external_id,
            display_name,
            email,
            picture,
            role,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this user may read the admin snapshot.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

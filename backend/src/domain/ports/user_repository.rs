//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by email, the natural key.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert `user` unless a row with the same email exists, then return the
    /// stored row. Concurrent first logins therefore converge on one record
    /// and an existing role or id is never overwritten.
    async fn insert_if_absent(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Read every user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}

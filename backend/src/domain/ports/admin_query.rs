//! Driving port for the operator's read-only snapshot.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Contact, Error, MaintenanceRequest, Order, User};

/// Every row of the four stores, unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSnapshot {
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub contacts: Vec<Contact>,
    pub maintenance: Vec<MaintenanceRequest>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// Return the snapshot when `caller` holds the admin role, else
    /// `forbidden`.
    async fn snapshot(&self, caller: &AuthenticatedUser) -> Result<AdminSnapshot, Error>;
}

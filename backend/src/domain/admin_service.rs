//! Admin aggregation view.
//!
//! Authorisation is an explicit capability check: the caller's stored user
//! row must carry the admin role. The session's copy of the role is not
//! trusted on its own.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    AdminQuery, AdminSnapshot, ContactRepository, MaintenanceRepository, OrderRepository,
    UserRepository,
};
use crate::domain::service_support::{map_inquiry_error, map_order_error, map_user_error};
use crate::domain::{AuthenticatedUser, Error};

/// Read-only snapshot over every store.
#[derive(Clone)]
pub struct AdminSnapshotService<U, O, C, M> {
    users: Arc<U>,
    orders: Arc<O>,
    contacts: Arc<C>,
    maintenance: Arc<M>,
}

impl<U, O, C, M> AdminSnapshotService<U, O, C, M> {
    /// Create the snapshot service over the four stores.
    pub fn new(users: Arc<U>, orders: Arc<O>, contacts: Arc<C>, maintenance: Arc<M>) -> Self {
        Self {
            users,
            orders,
            contacts,
            maintenance,
        }
    }
}

#[async_trait]
impl<U, O, C, M> AdminQuery for AdminSnapshotService<U, O, C, M>
where
    U: UserRepository,
    O: OrderRepository,
    C: ContactRepository,
    M: MaintenanceRepository,
{
    async fn snapshot(&self, caller: &AuthenticatedUser) -> Result<AdminSnapshot, Error> {
        let stored = self
            .users
            .find_by_email(&caller.email)
            .await
            .map_err(map_user_error)?;
        if !stored.as_ref().is_some_and(|user| user.is_admin()) {
            warn!(email = %caller.email, "admin snapshot denied");
            return Err(Error::forbidden("admin access required"));
        }

        let (users, orders, contacts, maintenance) = tokio::try_join!(
            async { self.users.list_all().await.map_err(map_user_error) },
            async { self.orders.list_all().await.map_err(map_order_error) },
            async { self.contacts.list_all().await.map_err(map_inquiry_error) },
            async { self.maintenance.list_all().await.map_err(map_inquiry_error) },
        )?;

        Ok(AdminSnapshot {
            users,
            orders,
            contacts,
            maintenance,
        })
    }
}

//! Driving port for a customer's order history.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Order};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Orders owned by `email`, newest first. Never returns another owner's
    /// orders.
    async fn list_orders_for_user(&self, email: &EmailAddress) -> Result<Vec<Order>, Error>;
}

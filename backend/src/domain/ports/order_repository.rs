//! Port for order persistence, including the guarded status transition.

use async_trait::async_trait;

use crate::domain::{EmailAddress, ExternalOrderId, Order, PaymentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
        /// An order with the same external identifier already exists.
        Duplicate { order_id: String } => "order {order_id} already exists",
    }
}

/// Result of attempting the `Created → Paid` transition.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkPaidOutcome {
    /// This call performed the transition; the order is now `Paid`.
    Transitioned(Order),
    /// The order was already `Paid`; nothing changed.
    AlreadyPaid(Order),
    /// No order carries the identifier.
    NotFound,
}

/// Port for reading and writing orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a freshly created order.
    async fn insert(&self, order: &Order) -> Result<(), OrderPersistenceError>;

    /// Atomically transition an order from `Created` to `Paid`.
    ///
    /// Implementations must serialise concurrent calls for the same order so
    /// exactly one of them observes [`MarkPaidOutcome::Transitioned`].
    async fn mark_paid(
        &self,
        order_id: &ExternalOrderId,
        payment_id: &PaymentId,
    ) -> Result<MarkPaidOutcome, OrderPersistenceError>;

    /// Orders owned by `email`, newest first.
    async fn list_for_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<Order>, OrderPersistenceError>;

    /// Every order, oldest first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError>;
}

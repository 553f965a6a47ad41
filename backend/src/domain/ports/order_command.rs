//! Driving port for opening payment-intent orders.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error};

/// Request to open an order for the authenticated caller.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub customer: AuthenticatedUser,
    /// Amount in major currency units.
    pub amount: f64,
    pub project_name: String,
}

/// Details the client needs to complete checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Amount in minor currency units, as sent to the payment collaborator.
    pub amount_minor: i64,
    /// Public checkout key.
    pub key: String,
    pub user_name: String,
    pub user_email: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Open a payment intent and persist a `Created` order for it.
    async fn create_order(&self, request: CreateOrderRequest)
    -> Result<CreateOrderResponse, Error>;
}

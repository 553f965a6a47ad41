//! Order store services: opening payment intents and reading order history.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateOrderRequest, CreateOrderResponse, OrderCommand, OrderQuery, OrderRepository,
    PaymentGateway, PaymentIntentRequest,
};
use crate::domain::service_support::{map_gateway_error, map_order_error};
use crate::domain::{Amount, EmailAddress, Error, Order, ProjectName};

/// Order service implementing the order command and query ports.
#[derive(Clone)]
pub struct OrderService<R> {
    orders: Arc<R>,
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
}

impl<R> OrderService<R> {
    /// Create a new order service.
    pub fn new(orders: Arc<R>, gateway: Arc<dyn PaymentGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders,
            gateway,
            clock,
        }
    }
}

#[async_trait]
impl<R> OrderCommand for OrderService<R>
where
    R: OrderRepository,
{
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, Error> {
        let CreateOrderRequest {
            customer,
            amount,
            project_name,
        } = request;
        let amount = Amount::new(amount)
            .map_err(|err| Error::invalid_request(format!("invalid amount: {err}")))?;
        let project_name = ProjectName::new(project_name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let now = self.clock.utc();
        // The gateway is called first so a rejected intent never leaves a row.
        let intent = self
            .gateway
            .create_intent(&PaymentIntentRequest {
                amount_minor: amount.minor_units(),
                receipt: format!("order_{}", now.timestamp()),
            })
            .await
            .map_err(map_gateway_error)?;

        let order = Order::created(
            intent.order_id,
            customer.email.clone(),
            project_name,
            amount,
            now,
        );
        self.orders
            .insert(&order)
            .await
            .map_err(map_order_error)?;
        info!(
            order_id = %order.order_id(),
            amount_minor = amount.minor_units(),
            "order created"
        );

        Ok(CreateOrderResponse {
            order_id: order.order_id().to_string(),
            amount_minor: amount.minor_units(),
            key: self.gateway.public_key(),
            user_name: customer.name,
            user_email: customer.email.to_string(),
        })
    }
}

#[async_trait]
impl<R> OrderQuery for OrderService<R>
where
    R: OrderRepository,
{
    async fn list_orders_for_user(&self, email: &EmailAddress) -> Result<Vec<Order>, Error> {
        let mut orders = self
            .orders
            .list_for_email(email)
            .await
            .map_err(map_order_error)?;
        orders.retain(|order| order.user_email() == email);
        Ok(orders)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;

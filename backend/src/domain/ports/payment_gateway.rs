//! Port for the payment collaborator that opens payment intents.

use async_trait::async_trait;

use crate::domain::ExternalOrderId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment gateway adapters.
    pub enum PaymentGatewayError {
        /// The collaborator refused the request; `message` is its own wording.
        Rejected { message: String } => "{message}",
        /// The collaborator could not be reached.
        Transport { message: String } => "payment gateway unreachable: {message}",
        /// The collaborator answered with a payload this adapter cannot read.
        InvalidResponse { message: String } => "payment gateway response invalid: {message}",
    }
}

/// Request to open a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    /// Amount in minor currency units.
    pub amount_minor: i64,
    /// Merchant receipt reference.
    pub receipt: String,
}

/// Payment intent accepted by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Externally issued order identifier.
    pub order_id: ExternalOrderId,
}

/// Port for opening payment intents with the payment collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a payment intent for `request.amount_minor`.
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError>;

    /// Public key the client needs to complete checkout.
    fn public_key(&self) -> String;
}

//! Driving port for reconciling payment confirmations.

use async_trait::async_trait;

use crate::domain::Error;

/// Confirmation delivered by the payment collaborator (directly or via the
/// client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    /// Optional hex HMAC-SHA256 over `"{order_id}|{payment_id}"`.
    pub signature: Option<String>,
}

/// Successful reconciliation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPaymentOutcome {
    /// The order moved to `Paid` and notifications were dispatched.
    Confirmed,
    /// The order was already `Paid`; nothing changed and nothing was sent.
    AlreadyPaid,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentConfirmation: Send + Sync {
    /// Apply a confirmation. Unknown orders yield a `not_found` error with no
    /// side effects; repeated confirmations are successful no-ops.
    async fn confirm_payment(
        &self,
        request: ConfirmPaymentRequest,
    ) -> Result<ConfirmPaymentOutcome, Error>;
}

//! Payment reconciliation engine.
//!
//! Applies a payment confirmation to the matching order exactly once. The
//! store performs the guarded `Created → Paid` transition; only the caller
//! that wins it dispatches the customer confirmation and operator alert, and
//! only after the transition is committed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ConfirmPaymentOutcome, ConfirmPaymentRequest, MarkPaidOutcome, OrderRepository,
    PaymentConfirmation,
};
use crate::domain::service_support::map_order_error;
use crate::domain::{
    EmailAddress, Error, ExternalOrderId, Notification, NotificationDispatcher, PaymentId,
    PaymentSignaturePolicy,
};

/// Reconciliation service implementing [`PaymentConfirmation`].
#[derive(Clone)]
pub struct PaymentReconciliationService<R> {
    orders: Arc<R>,
    dispatcher: NotificationDispatcher,
    operator: EmailAddress,
    signatures: PaymentSignaturePolicy,
}

impl<R> PaymentReconciliationService<R> {
    /// Create a reconciliation service.
    pub fn new(
        orders: Arc<R>,
        dispatcher: NotificationDispatcher,
        operator: EmailAddress,
        signatures: PaymentSignaturePolicy,
    ) -> Self {
        Self {
            orders,
            dispatcher,
            operator,
            signatures,
        }
    }
}

#[async_trait]
impl<R> PaymentConfirmation for PaymentReconciliationService<R>
where
    R: OrderRepository,
{
    async fn confirm_payment(
        &self,
        request: ConfirmPaymentRequest,
    ) -> Result<ConfirmPaymentOutcome, Error> {
        let order_id = ExternalOrderId::new(&request.order_id)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let payment_id = PaymentId::new(&request.payment_id)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if let Err(err) = self.signatures.check(
            order_id.as_ref(),
            payment_id.as_ref(),
            request.signature.as_deref(),
        ) {
            warn!(%order_id, %err, "payment confirmation rejected");
            return Err(Error::invalid_request(err.to_string()));
        }

        let outcome = self
            .orders
            .mark_paid(&order_id, &payment_id)
            .await
            .map_err(map_order_error)?;

        match outcome {
            MarkPaidOutcome::Transitioned(order) => {
                info!(%order_id, %payment_id, "order paid");
                let report = self
                    .dispatcher
                    .dispatch(vec![
                        Notification::order_confirmation(&order),
                        Notification::new_order_alert(&self.operator, &order),
                    ])
                    .await;
                if report.failed > 0 {
                    warn!(%order_id, failed = report.failed, "payment notifications incomplete");
                }
                Ok(ConfirmPaymentOutcome::Confirmed)
            }
            MarkPaidOutcome::AlreadyPaid(order) => {
                if order.payment_id() != Some(&payment_id) {
                    warn!(
                        %order_id,
                        %payment_id,
                        "confirmation for an order already paid under another payment id"
                    );
                }
                Ok(ConfirmPaymentOutcome::AlreadyPaid)
            }
            MarkPaidOutcome::NotFound => {
                warn!(%order_id, "confirmation for unknown order");
                Err(Error::not_found("order not found"))
            }
        }
    }
}

#[cfg(test)]
#[path = "reconciliation_service_tests.rs"]
mod tests;

//! Tests for payment reconciliation.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MailerError, MockMailer, MockOrderRepository, OrderPersistenceError};
use crate::domain::{
    Amount, DEFAULT_MAIL_TIMEOUT, ErrorCode, Order, ProjectName, sign_confirmation,
};

const SECRET: &str = "key_secret";

#[fixture]
fn operator() -> EmailAddress {
    EmailAddress::new("ops@studio.test").expect("operator email")
}

fn created_order() -> Order {
    Order::created(
        ExternalOrderId::new("order_1").expect("order id"),
        EmailAddress::new("a@x.com").expect("email"),
        ProjectName::new("Portfolio").expect("project"),
        Amount::new(1500.0).expect("amount"),
        Utc::now(),
    )
}

fn paid_order(payment_id: &str) -> Order {
    created_order()
        .mark_paid(PaymentId::new(payment_id).expect("payment id"))
        .expect("transition")
}

fn confirm(signature: Option<String>) -> ConfirmPaymentRequest {
    ConfirmPaymentRequest {
        order_id: "order_1".into(),
        payment_id: "pay_1".into(),
        signature,
    }
}

fn service(
    repo: MockOrderRepository,
    mailer: MockMailer,
    operator: EmailAddress,
    signatures: PaymentSignaturePolicy,
) -> PaymentReconciliationService<MockOrderRepository> {
    PaymentReconciliationService::new(
        Arc::new(repo),
        NotificationDispatcher::new(Arc::new(mailer), DEFAULT_MAIL_TIMEOUT),
        operator,
        signatures,
    )
}

#[rstest]
#[tokio::test]
async fn first_confirmation_sends_customer_and_operator_mail(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .withf(|order_id, payment_id| order_id.as_ref() == "order_1" && payment_id.as_ref() == "pay_1")
        .times(1)
        .return_once(|_, _| Ok(MarkPaidOutcome::Transitioned(paid_order("pay_1"))));
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .withf(|n| n.to.as_ref() == "a@x.com" && n.subject == "Order Confirmation")
        .times(1)
        .return_once(|_| Ok(()));
    mailer
        .expect_send()
        .withf(|n| n.to.as_ref() == "ops@studio.test" && n.subject == "New Order")
        .times(1)
        .return_once(|_| Ok(()));

    let outcome = service(repo, mailer, operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(confirm(None))
        .await
        .expect("confirmation succeeds");

    assert_eq!(outcome, ConfirmPaymentOutcome::Confirmed);
}

#[rstest]
#[tokio::test]
async fn repeated_confirmation_is_a_silent_success(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .return_once(|_, _| Ok(MarkPaidOutcome::AlreadyPaid(paid_order("pay_1"))));
    let mut mailer = MockMailer::new();
    mailer.expect_send().times(0);

    let outcome = service(repo, mailer, operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(confirm(None))
        .await
        .expect("idempotent success");

    assert_eq!(outcome, ConfirmPaymentOutcome::AlreadyPaid);
}

#[rstest]
#[tokio::test]
async fn unknown_order_is_not_found_without_mail(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .return_once(|_, _| Ok(MarkPaidOutcome::NotFound));
    let mut mailer = MockMailer::new();
    mailer.expect_send().times(0);

    let err = service(repo, mailer, operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(confirm(None))
        .await
        .expect_err("unknown order");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn mail_failures_do_not_fail_the_confirmation(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .return_once(|_, _| Ok(MarkPaidOutcome::Transitioned(paid_order("pay_1"))));
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(2)
        .returning(|_| Err(MailerError::delivery("connection reset")));

    let outcome = service(repo, mailer, operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(confirm(None))
        .await
        .expect("confirmation still succeeds");

    assert_eq!(outcome, ConfirmPaymentOutcome::Confirmed);
}

#[rstest]
#[case(None, true)]
#[case(Some("00ff".to_owned()), false)]
#[tokio::test]
async fn signature_failures_leave_the_order_untouched(
    operator: EmailAddress,
    #[case] signature: Option<String>,
    #[case] required: bool,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid().times(0);

    let err = service(
        repo,
        MockMailer::new(),
        operator,
        PaymentSignaturePolicy::new(SECRET, required),
    )
    .confirm_payment(confirm(signature))
    .await
    .expect_err("signature rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn valid_signature_is_accepted(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .return_once(|_, _| Ok(MarkPaidOutcome::AlreadyPaid(paid_order("pay_1"))));

    let outcome = service(
        repo,
        MockMailer::new(),
        operator,
        PaymentSignaturePolicy::new(SECRET, true),
    )
    .confirm_payment(confirm(Some(sign_confirmation(SECRET, "order_1", "pay_1"))))
    .await
    .expect("signed confirmation");

    assert_eq!(outcome, ConfirmPaymentOutcome::AlreadyPaid);
}

#[rstest]
#[tokio::test]
async fn blank_identifiers_are_invalid(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid().times(0);

    let err = service(repo, MockMailer::new(), operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(ConfirmPaymentRequest {
            order_id: " ".into(),
            payment_id: "pay_1".into(),
            signature: None,
        })
        .await
        .expect_err("blank order id");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn store_outage_is_service_unavailable(operator: EmailAddress) {
    let mut repo = MockOrderRepository::new();
    repo.expect_mark_paid()
        .return_once(|_, _| Err(OrderPersistenceError::connection("pool timed out")));

    let err = service(repo, MockMailer::new(), operator, PaymentSignaturePolicy::disabled())
        .confirm_payment(confirm(None))
        .await
        .expect_err("store outage");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

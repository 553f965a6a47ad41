//! End-to-end order lifecycle over the real route table.
//!
//! Covers checkout, reconciliation (including duplicate and concurrent
//! confirmations), gateway failures and per-customer order history.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use futures_util::future::join;
use rstest::rstest;
use serde_json::json;
use studio_backend::domain::OrderStatus;
use studio_backend::domain::notification::{NEW_ORDER_SUBJECT, ORDER_CONFIRMATION_SUBJECT};
use studio_backend::test_support::collaborators::STUB_PUBLIC_KEY;
use studio_backend::test_support::harness::{Harness, OPERATOR_EMAIL};
use support::{app, call_json, login};

const CUSTOMER: &str = "ada@example.com";

#[actix_web::test]
async fn checkout_opens_an_intent_in_minor_units_and_records_a_created_order() {
    let harness = Harness::default();
    let app = app(&harness).await;
    let cookie = login(&app, &harness, "Ada", CUSTOMER).await;

    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/create_order")
            .cookie(cookie)
            .set_json(json!({"amount": 1500.0, "project_name": "Portfolio Site"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "order_id": "order_stub_1",
            "amount": 150_000,
            "key": STUB_PUBLIC_KEY,
            "user_name": "Ada",
            "user_email": CUSTOMER,
        })
    );

    let requests = harness.gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_minor, 150_000);
    assert!(requests[0].receipt.starts_with("order_"));

    let stored = harness.orders.get("order_stub_1").expect("order stored");
    assert_eq!(stored.status(), OrderStatus::Created);
    assert!(stored.payment_id().is_none());
    assert_eq!(stored.user_email().as_ref(), CUSTOMER);
    assert!(harness.mailer.sent().is_empty(), "creation sends no mail");
}

#[rstest]
#[case::zero(0.0)]
#[case::negative(-25.0)]
#[case::below_one_minor_unit(0.004)]
#[actix_web::test]
async fn invalid_amounts_are_rejected_before_the_gateway(#[case] amount: f64) {
    let harness = Harness::default();
    let app = app(&harness).await;
    let cookie = login(&app, &harness, "Ada", CUSTOMER).await;

    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/create_order")
            .cookie(cookie)
            .set_json(json!({"amount": amount, "project_name": "Portfolio Site"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert!(harness.gateway.requests().is_empty());
    assert!(harness.orders.all().is_empty());
}

#[actix_web::test]
async fn gateway_rejection_passes_its_message_through_and_stores_nothing() {
    let harness = Harness::default();
    harness
        .gateway
        .reject_with("Amount exceeds maximum amount allowed.");
    let app = app(&harness).await;
    let cookie = login(&app, &harness, "Ada", CUSTOMER).await;

    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/create_order")
            .cookie(cookie)
            .set_json(json!({"amount": 99_999_999.0, "project_name": "Portfolio Site"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "payment_gateway");
    assert_eq!(body["message"], "Amount exceeds maximum amount allowed.");
    assert!(harness.orders.all().is_empty());
}

async fn create_order(harness: &Harness) -> String {
    let app = app(harness).await;
    let cookie = login(&app, harness, "Ada", CUSTOMER).await;
    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/create_order")
            .cookie(cookie)
            .set_json(json!({"amount": 1500.0, "project_name": "Portfolio Site"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["order_id"].as_str().expect("order id").to_owned()
}

fn confirmation(order_id: &str, payment_id: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/payment_success")
        .set_json(json!({"razorpay_order_id": order_id, "razorpay_payment_id": payment_id}))
        .to_request()
}

#[actix_web::test]
async fn confirming_twice_pays_once_and_notifies_once() {
    let harness = Harness::default();
    let order_id = create_order(&harness).await;
    let app = app(&harness).await;

    let (first, first_body) = call_json(&app, confirmation(&order_id, "pay_1")).await;
    let (second, second_body) = call_json(&app, confirmation(&order_id, "pay_2")).await;

    assert_eq!((first, first_body), (StatusCode::OK, json!({"status": "success"})));
    assert_eq!((second, second_body), (StatusCode::OK, json!({"status": "success"})));

    let stored = harness.orders.get(&order_id).expect("order stored");
    assert_eq!(stored.status(), OrderStatus::Paid);
    assert_eq!(stored.payment_id().map(AsRef::as_ref), Some("pay_1"));

    assert_eq!(harness.mailer.sent().len(), 2);
    assert_eq!(
        harness.mailer.subjects_for(CUSTOMER),
        vec![ORDER_CONFIRMATION_SUBJECT.to_owned()]
    );
    assert_eq!(
        harness.mailer.subjects_for(OPERATOR_EMAIL),
        vec![NEW_ORDER_SUBJECT.to_owned()]
    );
}

#[actix_web::test]
async fn concurrent_confirmations_transition_exactly_once() {
    let harness = Harness::default();
    let order_id = create_order(&harness).await;
    let app = app(&harness).await;

    let ((a, _), (b, _)) = join(
        call_json(&app, confirmation(&order_id, "pay_a")),
        call_json(&app, confirmation(&order_id, "pay_b")),
    )
    .await;

    assert_eq!(a, StatusCode::OK);
    assert_eq!(b, StatusCode::OK);
    assert_eq!(harness.mailer.sent().len(), 2, "one notification pair");
}

#[actix_web::test]
async fn unknown_orders_answer_a_generic_error() {
    let harness = Harness::default();
    let app = app(&harness).await;

    let (status, body) = call_json(&app, confirmation("order_missing", "pay_1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error"}));
    assert!(harness.mailer.sent().is_empty());
}

#[actix_web::test]
async fn failing_mail_never_fails_the_confirmation() {
    let harness = Harness::default();
    let order_id = create_order(&harness).await;
    harness.mailer.fail_deliveries();
    let app = app(&harness).await;

    let (status, body) = call_json(&app, confirmation(&order_id, "pay_1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success"}));
    assert_eq!(
        harness.orders.get(&order_id).map(|order| order.status()),
        Some(OrderStatus::Paid)
    );
}

#[actix_web::test]
async fn order_history_lists_only_the_callers_orders() {
    let harness = Harness::default();
    let paid = create_order(&harness).await;
    let app = app(&harness).await;
    let (status, _) = call_json(&app, confirmation(&paid, "pay_1")).await;
    assert_eq!(status, StatusCode::OK);

    let other = login(&app, &harness, "Grace", "grace@example.com").await;
    let (status, _) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/create_order")
            .cookie(other.clone())
            .set_json(json!({"amount": 200.0, "project_name": "Landing Page"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ada = login(&app, &harness, "Ada", CUSTOMER).await;
    let (status, rows) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/my_orders")
            .cookie(ada)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project_name"], "Portfolio Site");
    assert_eq!(rows[0]["amount"], 1500.0);
    assert_eq!(rows[0]["status"], "Paid");
    assert_eq!(rows[0]["payment_id"], "pay_1");

    let (_, grace_rows) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/my_orders")
            .cookie(other)
            .to_request(),
    )
    .await;
    let grace_rows = grace_rows.as_array().expect("array");
    assert_eq!(grace_rows.len(), 1);
    assert_eq!(grace_rows[0]["project_name"], "Landing Page");
    assert_eq!(grace_rows[0]["payment_id"], "N/A");
}

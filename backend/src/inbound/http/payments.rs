//! Payment confirmation handler.
//!
//! ```text
//! POST /payment_success {"razorpay_order_id":"order_1","razorpay_payment_id":"pay_1"}
//! ```
//!
//! The payment collaborator's checkout script posts here once the customer
//! completes payment. No session is required; the body alone identifies the
//! order.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::{ConfirmPaymentOutcome, ConfirmPaymentRequest};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Confirmation forwarded from the checkout widget.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PaymentSuccessBody {
    #[schema(example = "order_N4s2ZkQ1")]
    pub razorpay_order_id: String,
    #[schema(example = "pay_N4s3a9x0")]
    pub razorpay_payment_id: String,
    /// Hex HMAC-SHA256 over `"{order_id}|{payment_id}"`.
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

/// Outcome envelope: `success` or `error`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PaymentStatus {
    #[schema(example = "success")]
    pub status: String,
}

impl PaymentStatus {
    fn success() -> Self {
        Self {
            status: "success".to_owned(),
        }
    }

    fn error() -> Self {
        Self {
            status: "error".to_owned(),
        }
    }
}

/// Reconcile a payment confirmation against a stored order.
///
/// Unknown orders and rejected confirmations answer `400 {"status":"error"}`
/// without detail. Repeated confirmations succeed without side effects.
#[utoipa::path(
    post,
    path = "/payment_success",
    request_body = PaymentSuccessBody,
    responses(
        (status = 200, description = "Order paid", body = PaymentStatus),
        (status = 400, description = "Unknown order or invalid confirmation", body = PaymentStatus),
        (status = 503, description = "Order store unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "paymentSuccess",
    security([])
)]
#[post("/payment_success")]
pub async fn payment_success(
    state: web::Data<HttpState>,
    payload: web::Json<PaymentSuccessBody>,
) -> ApiResult<HttpResponse> {
    let PaymentSuccessBody {
        razorpay_order_id,
        razorpay_payment_id,
        razorpay_signature,
    } = payload.into_inner();
    let request = ConfirmPaymentRequest {
        order_id: razorpay_order_id,
        payment_id: razorpay_payment_id,
        signature: razorpay_signature,
    };

    match state.payments.confirm_payment(request).await {
        Ok(outcome) => {
            if outcome == ConfirmPaymentOutcome::AlreadyPaid {
                info!("payment confirmation repeated for a paid order");
            }
            Ok(HttpResponse::Ok().json(PaymentStatus::success()))
        }
        Err(error) if matches!(error.code(), ErrorCode::NotFound | ErrorCode::InvalidRequest) => {
            warn!(message = error.message(), "payment confirmation rejected");
            Ok(HttpResponse::BadRequest().json(PaymentStatus::error()))
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(Ok(ConfirmPaymentOutcome::Confirmed), StatusCode::OK, "success")]
    #[case(Ok(ConfirmPaymentOutcome::AlreadyPaid), StatusCode::OK, "success")]
    #[case(Err(Error::not_found("order not found")), StatusCode::BAD_REQUEST, "error")]
    #[case(Err(Error::invalid_request("signature mismatch")), StatusCode::BAD_REQUEST, "error")]
    #[actix_web::test]
    async fn maps_outcomes_to_status_envelopes(
        #[case] outcome: Result<ConfirmPaymentOutcome, Error>,
        #[case] expected_status: StatusCode,
        #[case] expected_body: &str,
    ) {
        let mut ports = MockPorts::default();
        ports
            .payments
            .expect_confirm_payment()
            .withf(|req| {
                req.order_id == "order_1" && req.payment_id == "pay_1" && req.signature.is_none()
            })
            .times(1)
            .return_once(move |_| outcome);
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(payment_success),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payment_success")
                .set_json(json!({
                    "razorpay_order_id": "order_1",
                    "razorpay_payment_id": "pay_1"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected_status);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "status": expected_body }));
    }

    #[actix_web::test]
    async fn forwards_the_signature() {
        let mut ports = MockPorts::default();
        ports
            .payments
            .expect_confirm_payment()
            .withf(|req| req.signature.as_deref() == Some("abcd"))
            .return_once(|_| Ok(ConfirmPaymentOutcome::Confirmed));
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(payment_success),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payment_success")
                .set_json(json!({
                    "razorpay_order_id": "order_1",
                    "razorpay_payment_id": "pay_1",
                    "razorpay_signature": "abcd"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn store_outages_propagate() {
        let mut ports = MockPorts::default();
        ports
            .payments
            .expect_confirm_payment()
            .return_once(|_| Err(Error::service_unavailable("order store unavailable")));
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(payment_success),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payment_success")
                .set_json(json!({
                    "razorpay_order_id": "order_1",
                    "razorpay_payment_id": "pay_1"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

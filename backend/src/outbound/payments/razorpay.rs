//! Reqwest-backed Razorpay orders client.
//!
//! Opens payment intents with `POST {base}/v1/orders` using HTTP basic auth.
//! Razorpay error bodies look like `{"error":{"code":..,"description":..}}`;
//! the description is passed through unchanged as the rejection message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ExternalOrderId;
use crate::domain::ports::{
    PaymentGateway, PaymentGatewayError, PaymentIntent, PaymentIntentRequest,
};

const DEFAULT_API_BASE: &str = "https://api.razorpay.com/";
const DEFAULT_CURRENCY: &str = "INR";

/// Merchant credentials and API location.
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Zeroizing<String>,
    pub currency: String,
    pub api_base: Url,
}

impl RazorpayConfig {
    /// Credentials against the public API in the default currency.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default base is a valid URL.
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            key_id: key_id.into(),
            key_secret: Zeroizing::new(key_secret.into()),
            currency: DEFAULT_CURRENCY.to_owned(),
            api_base: Url::parse(DEFAULT_API_BASE)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderDto<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderCreatedDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelopeDto {
    error: ErrorDetailDto,
}

#[derive(Debug, Deserialize)]
struct ErrorDetailDto {
    description: Option<String>,
    code: Option<String>,
}

/// Payment gateway adapter for Razorpay.
pub struct RazorpayGateway {
    client: Client,
    orders_url: Url,
    config: RazorpayConfig,
}

impl RazorpayGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentGatewayError::Transport`] when the client cannot be
    /// constructed or the API base cannot be joined with the orders path.
    pub fn new(config: RazorpayConfig, timeout: Duration) -> Result<Self, PaymentGatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        let orders_url = config
            .api_base
            .join("v1/orders")
            .map_err(|err| PaymentGatewayError::transport(format!("invalid api base: {err}")))?;
        Ok(Self {
            client,
            orders_url,
            config,
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        let payload = CreateOrderDto {
            amount: request.amount_minor,
            currency: &self.config.currency,
            receipt: &request.receipt,
        };
        let response = self
            .client
            .post(self.orders_url.clone())
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_intent(body.as_ref())
    }

    fn public_key(&self) -> String {
        self.config.key_id.clone()
    }
}

fn parse_intent(body: &[u8]) -> Result<PaymentIntent, PaymentGatewayError> {
    let decoded: OrderCreatedDto = serde_json::from_slice(body).map_err(|error| {
        PaymentGatewayError::invalid_response(format!("invalid order payload: {error}"))
    })?;
    let order_id = ExternalOrderId::new(&decoded.id)
        .map_err(|err| PaymentGatewayError::invalid_response(err.to_string()))?;
    Ok(PaymentIntent { order_id })
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    PaymentGatewayError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    let described = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .ok()
        .and_then(|envelope| envelope.error.description.or(envelope.error.code))
        .filter(|text| !text.trim().is_empty());

    match described {
        Some(description) if status.is_client_error() => PaymentGatewayError::rejected(description),
        Some(description) => {
            PaymentGatewayError::transport(format!("status {}: {description}", status.as_u16()))
        }
        None if status.is_client_error() => PaymentGatewayError::rejected(format!(
            "payment gateway returned status {}",
            status.as_u16()
        )),
        None => PaymentGatewayError::transport(format!("status {}", status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network parts of the Razorpay client.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn payload_uses_minor_units_currency_and_receipt() {
        let payload = CreateOrderDto {
            amount: 150_000,
            currency: "INR",
            receipt: "order_1700000000",
        };
        let json = serde_json::to_value(&payload).expect("serialises");
        assert_eq!(
            json,
            serde_json::json!({"amount": 150_000, "currency": "INR", "receipt": "order_1700000000"})
        );
    }

    #[rstest]
    fn orders_url_joins_the_api_base() {
        let config = RazorpayConfig::new("rzp_test_key", "secret").expect("config");
        let gateway = RazorpayGateway::new(config, Duration::from_secs(5)).expect("gateway");
        assert_eq!(gateway.orders_url.as_str(), "https://api.razorpay.com/v1/orders");
        assert_eq!(gateway.public_key(), "rzp_test_key");
    }

    #[rstest]
    fn parses_created_order_id() {
        let intent = parse_intent(br#"{"id":"order_Abc123","entity":"order","amount":150000}"#)
            .expect("intent parses");
        assert_eq!(intent.order_id.as_ref(), "order_Abc123");
    }

    #[rstest]
    #[case::not_json(b"oops".as_slice())]
    #[case::missing_id(br#"{"entity":"order"}"#.as_slice())]
    #[case::blank_id(br#"{"id":""}"#.as_slice())]
    fn malformed_success_bodies_are_invalid_responses(#[case] body: &[u8]) {
        let err = parse_intent(body).expect_err("must fail");
        assert!(matches!(err, PaymentGatewayError::InvalidResponse { .. }));
    }

    #[rstest]
    fn client_errors_pass_the_description_through() {
        let body = br#"{"error":{"code":"BAD_REQUEST_ERROR","description":"The amount must be atleast INR 1.00"}}"#;
        let err = map_status_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "The amount must be atleast INR 1.00");
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY)]
    fn server_errors_are_transport_failures(#[case] status: StatusCode) {
        let err = map_status_error(status, br#"{"error":{"description":"upstream down"}}"#);
        assert!(matches!(err, PaymentGatewayError::Transport { .. }));
    }

    #[rstest]
    fn client_errors_without_a_body_still_reject() {
        let err = map_status_error(StatusCode::UNAUTHORIZED, b"");
        assert!(matches!(err, PaymentGatewayError::Rejected { .. }));
        assert!(err.to_string().contains("401"));
    }
}

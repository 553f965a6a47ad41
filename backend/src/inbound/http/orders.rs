//! Order handlers.
//!
//! ```text
//! POST /create_order {"amount":1500.0,"project_name":"Portfolio"}
//! GET  /api/my_orders
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateOrderRequest, CreateOrderResponse};
use crate::domain::{Error, Order, OrderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Placeholder shown for orders without a payment id.
const NO_PAYMENT_ID: &str = "N/A";

/// Request body for `POST /create_order`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderBody {
    /// Amount in major currency units; must be positive.
    #[schema(example = 1500.0)]
    pub amount: f64,
    #[schema(example = "Portfolio website")]
    pub project_name: String,
}

/// Checkout details returned by `POST /create_order`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderReply {
    pub order_id: String,
    /// Amount in minor currency units.
    #[schema(example = 150000)]
    pub amount: i64,
    /// Public checkout key.
    pub key: String,
    pub user_name: String,
    pub user_email: String,
}

impl From<CreateOrderResponse> for CreateOrderReply {
    fn from(value: CreateOrderResponse) -> Self {
        Self {
            order_id: value.order_id,
            amount: value.amount_minor,
            key: value.key,
            user_name: value.user_name,
            user_email: value.user_email,
        }
    }
}

/// Row of `GET /api/my_orders`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OrderHistoryRow {
    pub project_name: String,
    /// Amount in major currency units.
    pub amount: f64,
    pub status: OrderStatus,
    /// Payment id, or `N/A` while unpaid.
    pub payment_id: String,
    /// Creation date, `YYYY-MM-DD`.
    #[schema(example = "2026-10-19")]
    pub date: String,
}

impl From<&Order> for OrderHistoryRow {
    fn from(order: &Order) -> Self {
        Self {
            project_name: order.project_name().as_ref().to_owned(),
            amount: order.amount().major(),
            status: order.status(),
            payment_id: order
                .payment_id()
                .map_or_else(|| NO_PAYMENT_ID.to_owned(), ToString::to_string),
            date: order.created_at().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Open a payment intent for the authenticated caller.
#[utoipa::path(
    post,
    path = "/create_order",
    request_body = CreateOrderBody,
    responses(
        (status = 200, description = "Order created", body = CreateOrderReply),
        (status = 400, description = "Invalid amount or project", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Payment gateway rejected the order", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/create_order")]
pub async fn create_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateOrderBody>,
) -> ApiResult<web::Json<CreateOrderReply>> {
    let customer = session.require_user()?;
    let CreateOrderBody {
        amount,
        project_name,
    } = payload.into_inner();
    let response = state
        .orders
        .create_order(CreateOrderRequest {
            customer,
            amount,
            project_name,
        })
        .await?;
    Ok(web::Json(response.into()))
}

/// List the caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/my_orders",
    responses(
        (status = 200, description = "Caller's orders", body = [OrderHistoryRow]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listMyOrders"
)]
#[get("/api/my_orders")]
pub async fn my_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OrderHistoryRow>>> {
    let customer = session.require_user()?;
    let orders = state
        .order_history
        .list_orders_for_user(&customer.email)
        .await?;
    Ok(web::Json(orders.iter().map(OrderHistoryRow::from).collect()))
}

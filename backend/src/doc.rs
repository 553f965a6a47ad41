//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the HTTP API. It registers:
//!
//! - **Paths**: every endpoint from the inbound layer (auth, orders,
//!   payments, admin, inquiries, health)
//! - **Schemas**: request and response DTOs plus the shared [`Error`] payload
//! - **Security**: session cookie authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.
//!
//! [`Error`]: crate::domain::Error

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, OrderStatus};
use crate::inbound::http::admin::{
    AdminContactRow, AdminData, AdminMaintenanceRow, AdminOrderRow, AdminUserRow,
};
use crate::inbound::http::inquiries::{ContactBody, MaintenanceBody, Submitted};
use crate::inbound::http::orders::{CreateOrderBody, CreateOrderReply, OrderHistoryRow};
use crate::inbound::http::payments::{PaymentStatus, PaymentSuccessBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by GET /authorize after a successful login.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Studio backend API",
        description = "Customer login, project checkout, payment reconciliation, enquiries and the operator snapshot."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::authorize,
        crate::inbound::http::auth::logout,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::my_orders,
        crate::inbound::http::payments::payment_success,
        crate::inbound::http::admin::admin_data,
        crate::inbound::http::inquiries::submit_contact,
        crate::inbound::http::inquiries::submit_maintenance,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        OrderStatus,
        CreateOrderBody,
        CreateOrderReply,
        OrderHistoryRow,
        PaymentSuccessBody,
        PaymentStatus,
        AdminData,
        AdminUserRow,
        AdminOrderRow,
        AdminContactRow,
        AdminMaintenanceRow,
        ContactBody,
        MaintenanceBody,
        Submitted,
    )),
    tags(
        (name = "auth", description = "Identity handshake and logout"),
        (name = "orders", description = "Project checkout and order history"),
        (name = "payments", description = "Payment confirmation"),
        (name = "admin", description = "Operator snapshot"),
        (name = "inquiries", description = "Contact and maintenance forms"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

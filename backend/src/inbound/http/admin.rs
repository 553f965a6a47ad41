//! Operator snapshot handler.
//!
//! ```text
//! GET /api/admin/data
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AdminSnapshot;
use crate::domain::{Contact, Error, MaintenanceRequest, Order, OrderStatus, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// User row of the snapshot.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminUserRow {
    pub name: String,
    pub email: String,
    /// Account creation time, RFC 3339.
    pub last_login: String,
}

impl From<&User> for AdminUserRow {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name().to_owned(),
            email: user.email().to_string(),
            last_login: user.created_at().to_rfc3339(),
        }
    }
}

/// Order row of the snapshot.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderRow {
    pub order_id: String,
    /// Owner email.
    pub user_name: String,
    pub project_name: String,
    /// Amount in major currency units.
    pub project_price: f64,
    pub project_status: OrderStatus,
}

impl From<&Order> for AdminOrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id().to_string(),
            user_name: order.user_email().to_string(),
            project_name: order.project_name().as_ref().to_owned(),
            project_price: order.amount().major(),
            project_status: order.status(),
        }
    }
}

/// Contact row of the snapshot.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminContactRow {
    pub name: String,
    pub email: String,
    pub service: Option<String>,
    pub message: String,
}

impl From<&Contact> for AdminContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.to_string(),
            service: contact.service.clone(),
            message: contact.message.clone(),
        }
    }
}

/// Maintenance row of the snapshot.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminMaintenanceRow {
    pub user: String,
    pub issue: String,
    pub addons: String,
    pub cost: f64,
    pub status: String,
}

impl From<&MaintenanceRequest> for AdminMaintenanceRow {
    fn from(request: &MaintenanceRequest) -> Self {
        Self {
            user: request.user_email.to_string(),
            issue: request.issue_type.clone(),
            addons: request.addons.clone(),
            cost: request.estimated_cost,
            status: request.status.clone(),
        }
    }
}

/// Every stored row, flattened for the operator dashboard.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminData {
    pub users: Vec<AdminUserRow>,
    pub orders: Vec<AdminOrderRow>,
    pub contacts: Vec<AdminContactRow>,
    pub maintenance: Vec<AdminMaintenanceRow>,
}

impl From<AdminSnapshot> for AdminData {
    fn from(snapshot: AdminSnapshot) -> Self {
        Self {
            users: snapshot.users.iter().map(AdminUserRow::from).collect(),
            orders: snapshot.orders.iter().map(AdminOrderRow::from).collect(),
            contacts: snapshot.contacts.iter().map(AdminContactRow::from).collect(),
            maintenance: snapshot
                .maintenance
                .iter()
                .map(AdminMaintenanceRow::from)
                .collect(),
        }
    }
}

/// Read the operator snapshot.
#[utoipa::path(
    get,
    path = "/api/admin/data",
    responses(
        (status = 200, description = "All stored rows", body = AdminData),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminData"
)]
#[get("/api/admin/data")]
pub async fn admin_data(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AdminData>> {
    let caller = session.require_user()?;
    let snapshot = state.admin.snapshot(&caller).await?;
    Ok(web::Json(snapshot.into()))
}

//! Contact and maintenance form handlers.
//!
//! ```text
//! POST /api/contact      {"name":"Ada","email":"ada@x.com","message":"Hi"}
//! POST /api/maintenance  {"issueType":"Bug","description":"...","addons":"SEO","cost":250}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{ContactSubmission, MaintenanceSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Contact form body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

/// Maintenance form body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceBody {
    pub issue_type: String,
    pub description: String,
    /// Selected add-ons; stored as `None` when omitted.
    #[serde(default)]
    pub addons: Option<String>,
    /// Estimated cost in major currency units; defaults to zero.
    #[serde(default)]
    pub cost: Option<f64>,
}

/// `{"status":"success"}` acknowledgement.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Submitted {
    #[schema(example = "success")]
    pub status: String,
}

impl Submitted {
    fn success() -> web::Json<Self> {
        web::Json(Self {
            status: "success".to_owned(),
        })
    }
}

/// Store a contact inquiry and alert the operator.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactBody,
    responses(
        (status = 200, description = "Inquiry stored", body = Submitted),
        (status = 400, description = "Invalid submission", body = Error)
    ),
    tags = ["inquiries"],
    operation_id = "submitContact",
    security([])
)]
#[post("/api/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactBody>,
) -> ApiResult<web::Json<Submitted>> {
    let ContactBody {
        name,
        email,
        phone,
        service,
        message,
    } = payload.into_inner();
    state
        .inquiries
        .submit_contact(ContactSubmission {
            name,
            email,
            phone,
            service,
            message,
        })
        .await?;
    Ok(Submitted::success())
}

/// Store a maintenance request for the caller.
#[utoipa::path(
    post,
    path = "/api/maintenance",
    request_body = MaintenanceBody,
    responses(
        (status = 200, description = "Request stored", body = Submitted),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["inquiries"],
    operation_id = "submitMaintenance"
)]
#[post("/api/maintenance")]
pub async fn submit_maintenance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MaintenanceBody>,
) -> ApiResult<web::Json<Submitted>> {
    let customer = session.require_user()?;
    let MaintenanceBody {
        issue_type,
        description,
        addons,
        cost,
    } = payload.into_inner();
    state
        .inquiries
        .submit_maintenance(MaintenanceSubmission {
            customer,
            issue_type,
            description,
            addons,
            estimated_cost: cost,
        })
        .await?;
    Ok(Submitted::success())
}

//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer. Reading a row back into a domain
//! type re-runs domain validation, so a corrupted row surfaces as a query
//! error instead of an invalid value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Amount, Contact, EmailAddress, ExternalOrderId, MaintenanceRequest, Order, OrderDraft,
    OrderStatus, PaymentId, ProjectName, Role, User, UserDraft, UserId,
};

use super::schema::{contacts, maintenance_requests, orders, users};

/// Row that failed domain validation on read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: {reason}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    id: Uuid,
    reason: String,
}

impl CorruptRow {
    fn new(table: &'static str, id: Uuid, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub display_name: String,
    pub email: String,
    pub picture: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            external_id: user.external_id().to_owned(),
            display_name: user.display_name().to_owned(),
            email: user.email().to_string(),
            picture: user.picture().map(str::to_owned),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = CorruptRow;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |reason: String| CorruptRow::new("users", id, reason);
        let email = EmailAddress::new(&row.email).map_err(|err| corrupt(err.to_string()))?;
        let role: Role = row.role.parse().map_err(|err: crate::domain::UserValidationError| {
            corrupt(err.to_string())
        })?;
        Ok(User::restore(UserDraft {
            id: UserId::from_uuid(id),
            external_id: row.external_id,
            display_name: row.display_name,
            email,
            picture: row.picture,
            role,
            created_at: row.created_at,
        }))
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub order_id: String,
    pub user_email: String,
    pub project_name: String,
    pub amount: f64,
    pub status: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            order_id: order.order_id().to_string(),
            user_email: order.user_email().to_string(),
            project_name: order.project_name().as_ref().to_owned(),
            amount: order.amount().major(),
            status: order.status().as_str().to_owned(),
            payment_id: order.payment_id().map(ToString::to_string),
            created_at: order.created_at(),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = CorruptRow;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |reason: String| CorruptRow::new("orders", id, reason);
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|err: crate::domain::OrderValidationError| corrupt(err.to_string()))?;
        let payment_id = row
            .payment_id
            .map(PaymentId::new)
            .transpose()
            .map_err(|err| corrupt(err.to_string()))?;
        Order::restore(OrderDraft {
            id,
            order_id: ExternalOrderId::new(&row.order_id).map_err(|err| corrupt(err.to_string()))?,
            user_email: EmailAddress::new(&row.user_email)
                .map_err(|err| corrupt(err.to_string()))?,
            project_name: ProjectName::new(&row.project_name)
                .map_err(|err| corrupt(err.to_string()))?,
            amount: Amount::new(row.amount).map_err(|err| corrupt(err.to_string()))?,
            status,
            payment_id,
            created_at: row.created_at,
        })
        .map_err(|err| corrupt(err.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            email: contact.email.to_string(),
            phone: contact.phone.clone(),
            service: contact.service.clone(),
            message: contact.message.clone(),
            created_at: contact.created_at,
        }
    }
}

impl TryFrom<ContactRow> for Contact {
    type Error = CorruptRow;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&row.email)
            .map_err(|err| CorruptRow::new("contacts", row.id, err))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            phone: row.phone,
            service: row.service,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = maintenance_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaintenanceRow {
    pub id: Uuid,
    pub user_email: String,
    pub issue_type: String,
    pub description: String,
    pub addons: String,
    pub estimated_cost: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&MaintenanceRequest> for MaintenanceRow {
    fn from(request: &MaintenanceRequest) -> Self {
        Self {
            id: request.id,
            user_email: request.user_email.to_string(),
            issue_type: request.issue_type.clone(),
            description: request.description.clone(),
            addons: request.addons.clone(),
            estimated_cost: request.estimated_cost,
            status: request.status.clone(),
            created_at: request.created_at,
        }
    }
}

impl TryFrom<MaintenanceRow> for MaintenanceRequest {
    type Error = CorruptRow;

    fn try_from(row: MaintenanceRow) -> Result<Self, Self::Error> {
        let user_email = EmailAddress::new(&row.user_email)
            .map_err(|err| CorruptRow::new("maintenance_requests", row.id, err))?;
        Ok(Self {
            id: row.id,
            user_email,
            issue_type: row.issue_type,
            description: row.description,
            addons: row.addons,
            estimated_cost: row.estimated_cost,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

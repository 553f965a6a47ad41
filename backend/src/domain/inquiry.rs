//! Create-only inquiry records: contact messages and maintenance requests.
//!
//! Neither record has a lifecycle beyond "create and store"; the admin
//! snapshot is their only reader.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::EmailAddress;

/// Validation errors for inquiry submissions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InquiryValidationError {
    /// A required text field was blank.
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    /// The submitted email address was malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    /// Estimated cost was negative or not a finite number.
    #[error("estimated cost must be a finite, non-negative number")]
    InvalidCost,
}

fn required(value: &str, field: &'static str) -> Result<String, InquiryValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InquiryValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Contact-form inquiry from a prospective customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Validate a contact-form submission.
    pub fn submit(
        name: &str,
        email: &str,
        phone: Option<&str>,
        service: Option<&str>,
        message: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InquiryValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: required(name, "name")?,
            email: EmailAddress::new(email)
                .map_err(|err| InquiryValidationError::InvalidEmail(err.to_string()))?,
            phone: optional(phone),
            service: optional(service),
            message: required(message, "message")?,
            created_at,
        })
    }
}

/// Status given to every new maintenance request.
pub const MAINTENANCE_PENDING: &str = "Pending";

/// Add-on label stored when the customer selects none.
pub const NO_ADDONS: &str = "None";

/// Maintenance-service request raised by an authenticated customer.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub user_email: EmailAddress,
    pub issue_type: String,
    pub description: String,
    pub addons: String,
    pub estimated_cost: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    /// Validate a maintenance submission, applying the `None` add-on and zero
    /// cost defaults.
    pub fn submit(
        user_email: EmailAddress,
        issue_type: &str,
        description: &str,
        addons: Option<&str>,
        estimated_cost: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InquiryValidationError> {
        let estimated_cost = estimated_cost.unwrap_or(0.0);
        if !estimated_cost.is_finite() || estimated_cost < 0.0 {
            return Err(InquiryValidationError::InvalidCost);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_email,
            issue_type: required(issue_type, "issue type")?,
            description: required(description, "description")?,
            addons: optional(addons).unwrap_or_else(|| NO_ADDONS.to_owned()),
            estimated_cost,
            status: MAINTENANCE_PENDING.to_owned(),
            created_at,
        })
    }
}

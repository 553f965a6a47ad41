//! Driving port for contact and maintenance submissions.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error};

/// Contact form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

/// Maintenance request as submitted by an authenticated customer.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceSubmission {
    pub customer: AuthenticatedUser,
    pub issue_type: String,
    pub description: String,
    pub addons: Option<String>,
    pub estimated_cost: Option<f64>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryCommand: Send + Sync {
    /// Store a contact inquiry and alert the operator.
    async fn submit_contact(&self, submission: ContactSubmission) -> Result<(), Error>;

    /// Store a maintenance request, alert the operator and acknowledge the
    /// customer.
    async fn submit_maintenance(&self, submission: MaintenanceSubmission) -> Result<(), Error>;
}

//! Port for storing maintenance-service requests.

use async_trait::async_trait;

use crate::domain::MaintenanceRequest;

use super::InquiryPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Persist a maintenance request.
    async fn insert(&self, request: &MaintenanceRequest) -> Result<(), InquiryPersistenceError>;

    /// Every maintenance request, oldest first.
    async fn list_all(&self) -> Result<Vec<MaintenanceRequest>, InquiryPersistenceError>;
}

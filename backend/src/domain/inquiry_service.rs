//! Contact and maintenance submissions.
//!
//! Both are create-and-store operations followed by best-effort
//! notifications; a failed notification never fails the submission.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ContactRepository, ContactSubmission, InquiryCommand, MaintenanceRepository,
    MaintenanceSubmission,
};
use crate::domain::service_support::map_inquiry_error;
use crate::domain::{
    Contact, EmailAddress, Error, MaintenanceRequest, Notification, NotificationDispatcher,
};

/// Inquiry service implementing [`InquiryCommand`].
#[derive(Clone)]
pub struct InquiryService<C, M> {
    contacts: Arc<C>,
    maintenance: Arc<M>,
    dispatcher: NotificationDispatcher,
    operator: EmailAddress,
    clock: Arc<dyn Clock>,
}

impl<C, M> InquiryService<C, M> {
    /// Create the inquiry service.
    pub fn new(
        contacts: Arc<C>,
        maintenance: Arc<M>,
        dispatcher: NotificationDispatcher,
        operator: EmailAddress,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contacts,
            maintenance,
            dispatcher,
            operator,
            clock,
        }
    }
}

#[async_trait]
impl<C, M> InquiryCommand for InquiryService<C, M>
where
    C: ContactRepository,
    M: MaintenanceRepository,
{
    async fn submit_contact(&self, submission: ContactSubmission) -> Result<(), Error> {
        let contact = Contact::submit(
            &submission.name,
            &submission.email,
            submission.phone.as_deref(),
            submission.service.as_deref(),
            &submission.message,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.contacts
            .insert(&contact)
            .await
            .map_err(map_inquiry_error)?;
        info!(contact_id = %contact.id, "contact inquiry stored");

        self.dispatcher
            .dispatch(vec![Notification::contact_alert(&self.operator, &contact)])
            .await;
        Ok(())
    }

    async fn submit_maintenance(&self, submission: MaintenanceSubmission) -> Result<(), Error> {
        let MaintenanceSubmission {
            customer,
            issue_type,
            description,
            addons,
            estimated_cost,
        } = submission;
        let request = MaintenanceRequest::submit(
            customer.email.clone(),
            &issue_type,
            &description,
            addons.as_deref(),
            estimated_cost,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.maintenance
            .insert(&request)
            .await
            .map_err(map_inquiry_error)?;
        info!(request_id = %request.id, "maintenance request stored");

        self.dispatcher
            .dispatch(vec![
                Notification::maintenance_alert(&self.operator, &request),
                Notification::maintenance_confirmation(&customer, &request),
            ])
            .await;
        Ok(())
    }
}

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, payment gateway, identity provider, mailer)
//! are implemented by outbound adapters. Driving ports (login, orders,
//! payment confirmation, admin snapshot, inquiries) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_query;
mod contact_repository;
mod identity_provider;
mod inquiry_command;
mod login_service;
mod mailer;
mod maintenance_repository;
mod order_command;
mod order_query;
mod order_repository;
mod payment_confirmation;
mod payment_gateway;
mod user_repository;

#[cfg(test)]
pub use admin_query::MockAdminQuery;
pub use admin_query::{AdminQuery, AdminSnapshot};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, InquiryPersistenceError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use inquiry_command::MockInquiryCommand;
pub use inquiry_command::{ContactSubmission, InquiryCommand, MaintenanceSubmission};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{Mailer, MailerError};
pub use maintenance_repository::MaintenanceRepository;
#[cfg(test)]
pub use maintenance_repository::MockMaintenanceRepository;
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{CreateOrderRequest, CreateOrderResponse, OrderCommand};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{MarkPaidOutcome, OrderPersistenceError, OrderRepository};
#[cfg(test)]
pub use payment_confirmation::MockPaymentConfirmation;
pub use payment_confirmation::{
    ConfirmPaymentOutcome, ConfirmPaymentRequest, PaymentConfirmation,
};
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
pub use payment_gateway::{
    PaymentGateway, PaymentGatewayError, PaymentIntent, PaymentIntentRequest,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

//! Domain types, services and ports.
//!
//! Purpose: model users, payment-intent orders, inquiries and notifications
//! with validated constructors, and implement the driving ports that inbound
//! adapters call. Nothing here depends on HTTP, SQL or SMTP.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, EmailAddress, Role: identity records keyed by email.
//! - Order, Amount, OrderStatus: the `Created → Paid` lifecycle.
//! - Contact, MaintenanceRequest: create-only inquiry rows.
//! - Notification, NotificationDispatcher: best-effort email side effects.
//! - Services: IdentityLoginService, OrderService,
//!   PaymentReconciliationService, AdminSnapshotService, InquiryService.

pub mod admin_service;
pub mod auth;
pub mod error;
pub mod inquiry;
pub mod inquiry_service;
pub mod login_service;
pub mod notification;
pub mod notification_dispatcher;
pub mod order;
pub mod order_service;
pub mod payment_signature;
pub mod ports;
pub mod reconciliation_service;
mod service_support;
pub mod user;

pub use self::admin_service::AdminSnapshotService;
pub use self::auth::{AuthenticatedUser, LoginCallback, LoginError, LoginRedirect};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inquiry::{
    Contact, InquiryValidationError, MAINTENANCE_PENDING, MaintenanceRequest, NO_ADDONS,
};
pub use self::inquiry_service::InquiryService;
pub use self::login_service::IdentityLoginService;
pub use self::notification::Notification;
pub use self::notification_dispatcher::{
    DEFAULT_MAIL_TIMEOUT, DispatchReport, NotificationDispatcher,
};
pub use self::order::{
    Amount, ExternalOrderId, Order, OrderDraft, OrderStatus, OrderTransitionError,
    OrderValidationError, PaymentId, ProjectName,
};
pub use self::order_service::OrderService;
pub use self::payment_signature::{PaymentSignaturePolicy, SignatureError, sign_confirmation};
pub use self::reconciliation_service::PaymentReconciliationService;
pub use self::user::{
    EmailAddress, IdentityProfile, Role, User, UserDraft, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use studio_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

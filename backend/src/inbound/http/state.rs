//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminQuery, InquiryCommand, LoginService, OrderCommand, OrderQuery, PaymentConfirmation,
};

/// Dependency bundle for HTTP handlers.
///
/// Every field is a driving port; adapters never reach persistence or
/// collaborators directly.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub orders: Arc<dyn OrderCommand>,
    pub order_history: Arc<dyn OrderQuery>,
    pub payments: Arc<dyn PaymentConfirmation>,
    pub admin: Arc<dyn AdminQuery>,
    pub inquiries: Arc<dyn InquiryCommand>,
}

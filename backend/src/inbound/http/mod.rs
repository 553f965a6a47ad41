//! HTTP inbound adapter exposing the website API.
//!
//! Handlers depend only on the driving ports bundled in [`state::HttpState`];
//! the session middleware and state are attached by the caller.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod inquiries;
pub mod orders;
pub mod payments;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// Reject malformed JSON bodies with `400 invalid_request`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}")).into()
    })
}

/// Register every endpoint.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] as app data and a
/// session middleware around the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(auth::login)
        .service(auth::authorize)
        .service(auth::logout)
        .service(orders::create_order)
        .service(orders::my_orders)
        .service(payments::payment_success)
        .service(admin::admin_data)
        .service(inquiries::submit_contact)
        .service(inquiries::submit_maintenance)
        .service(health::ready)
        .service(health::live);
}

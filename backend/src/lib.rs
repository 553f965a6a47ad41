//! Backend library modules.
//!
//! Hexagonal layout: `domain` holds types, services and ports; `inbound`
//! adapts HTTP requests onto driving ports; `outbound` implements driven
//! ports against PostgreSQL, the identity provider, the payment gateway and
//! the mail relay.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

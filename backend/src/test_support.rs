//! Test utilities for the backend crate.
//!
//! In-memory adapters for every driven port plus a harness that wires them
//! into the real domain services, so integration tests in `tests/` can drive
//! the full Actix app without PostgreSQL, SMTP or network collaborators.
//! Compiled for unit tests and behind the `test-support` feature.

pub mod collaborators;
pub mod in_memory;

pub use collaborators::{RecordingMailer, StubIdentityProvider, StubPaymentGateway};
pub use in_memory::{
    InMemoryContactRepository, InMemoryMaintenanceRepository, InMemoryOrderRepository,
    InMemoryUserRepository,
};

pub mod harness {
    //! Wiring of domain services over in-memory adapters.

    use std::sync::Arc;
    use std::time::Duration;

    use mockable::DefaultClock;

    use super::{
        InMemoryContactRepository, InMemoryMaintenanceRepository, InMemoryOrderRepository,
        InMemoryUserRepository, RecordingMailer, StubIdentityProvider, StubPaymentGateway,
    };
    use crate::domain::{
        AdminSnapshotService, EmailAddress, IdentityLoginService, InquiryService,
        NotificationDispatcher, OrderService, PaymentReconciliationService,
        PaymentSignaturePolicy,
    };
    use crate::inbound::http::state::HttpState;

    /// Operator address granted the admin role on first login.
    pub const OPERATOR_EMAIL: &str = "operator@studio.example";

    /// Every adapter behind an [`HttpState`], exposed for assertions.
    pub struct Harness {
        pub users: Arc<InMemoryUserRepository>,
        pub orders: Arc<InMemoryOrderRepository>,
        pub contacts: Arc<InMemoryContactRepository>,
        pub maintenance: Arc<InMemoryMaintenanceRepository>,
        pub mailer: Arc<RecordingMailer>,
        pub gateway: Arc<StubPaymentGateway>,
        pub identity: Arc<StubIdentityProvider>,
        pub signatures: PaymentSignaturePolicy,
    }

    impl Default for Harness {
        fn default() -> Self {
            Self {
                users: Arc::default(),
                orders: Arc::default(),
                contacts: Arc::default(),
                maintenance: Arc::default(),
                mailer: Arc::default(),
                gateway: Arc::new(StubPaymentGateway::default()),
                identity: Arc::new(StubIdentityProvider::default()),
                signatures: PaymentSignaturePolicy::disabled(),
            }
        }
    }

    impl Harness {
        /// Operator address as a domain value.
        pub fn operator() -> EmailAddress {
            match EmailAddress::new(OPERATOR_EMAIL) {
                Ok(email) => email,
                Err(err) => panic!("operator fixture email must be valid: {err}"),
            }
        }

        /// Build the handler state over these adapters.
        pub fn http_state(&self) -> HttpState {
            let clock = Arc::new(DefaultClock);
            let dispatcher = NotificationDispatcher::new(self.mailer.clone(), Duration::from_secs(1));
            let orders = Arc::new(OrderService::new(
                self.orders.clone(),
                self.gateway.clone(),
                clock.clone(),
            ));
            HttpState {
                login: Arc::new(IdentityLoginService::new(
                    self.identity.clone(),
                    self.users.clone(),
                    Self::operator(),
                    clock.clone(),
                )),
                orders: orders.clone(),
                order_history: orders,
                payments: Arc::new(PaymentReconciliationService::new(
                    self.orders.clone(),
                    dispatcher.clone(),
                    Self::operator(),
                    self.signatures.clone(),
                )),
                admin: Arc::new(AdminSnapshotService::new(
                    self.users.clone(),
                    self.orders.clone(),
                    self.contacts.clone(),
                    self.maintenance.clone(),
                )),
                inquiries: Arc::new(InquiryService::new(
                    self.contacts.clone(),
                    self.maintenance.clone(),
                    dispatcher,
                    Self::operator(),
                    clock,
                )),
            }
        }
    }
}

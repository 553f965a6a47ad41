//! Stand-ins for the mail relay, payment gateway and identity provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, Mailer, MailerError, PaymentGateway,
    PaymentGatewayError, PaymentIntent, PaymentIntentRequest,
};
use crate::domain::{ExternalOrderId, IdentityProfile, Notification};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Mailer that records every notification it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    /// Make every later send fail with a delivery error. Attempts are still
    /// recorded.
    pub fn fail_deliveries(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Notifications handed to the mailer so far.
    pub fn sent(&self) -> Vec<Notification> {
        lock(&self.sent).clone()
    }

    /// Subjects of notifications addressed to `recipient`.
    pub fn subjects_for(&self, recipient: &str) -> Vec<String> {
        lock(&self.sent)
            .iter()
            .filter(|notification| notification.to.as_ref() == recipient)
            .map(|notification| notification.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError> {
        lock(&self.sent).push(notification.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailerError::delivery("relay refused the message"));
        }
        Ok(())
    }
}

/// Public key reported by [`StubPaymentGateway`].
pub const STUB_PUBLIC_KEY: &str = "rzp_test_stub";

/// Gateway issuing sequential `order_stub_N` identifiers.
#[derive(Default)]
pub struct StubPaymentGateway {
    issued: AtomicUsize,
    requests: Mutex<Vec<PaymentIntentRequest>>,
    rejection: Mutex<Option<String>>,
}

impl StubPaymentGateway {
    /// Reject every later request with `message`.
    pub fn reject_with(&self, message: impl Into<String>) {
        *lock(&self.rejection) = Some(message.into());
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<PaymentIntentRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        lock(&self.requests).push(request.clone());
        if let Some(message) = lock(&self.rejection).clone() {
            return Err(PaymentGatewayError::rejected(message));
        }
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let order_id = ExternalOrderId::new(format!("order_stub_{sequence}"))
            .map_err(|err| PaymentGatewayError::invalid_response(err.to_string()))?;
        Ok(PaymentIntent { order_id })
    }

    fn public_key(&self) -> String {
        STUB_PUBLIC_KEY.to_owned()
    }
}

/// Base of the redirect URL produced by [`StubIdentityProvider`].
pub const STUB_AUTHORIZE_URL: &str = "https://identity.test/authorize";

/// Identity provider that resolves registered codes to fixed profiles.
#[derive(Default)]
pub struct StubIdentityProvider {
    profiles: Mutex<HashMap<String, IdentityProfile>>,
}

impl StubIdentityProvider {
    /// Resolve `code` to a profile built from the given parts.
    ///
    /// # Panics
    ///
    /// Panics when the parts do not form a valid profile.
    pub fn register(&self, code: &str, name: &str, email: &str) {
        let profile = match IdentityProfile::try_from_parts(
            &format!("ext-{email}"),
            name,
            email,
            Some(format!("https://identity.test/pictures/{name}.png")),
        ) {
            Ok(profile) => profile,
            Err(err) => panic!("stub profile for {email} is invalid: {err}"),
        };
        lock(&self.profiles).insert(code.to_owned(), profile);
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError> {
        Ok(format!("{STUB_AUTHORIZE_URL}?state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityProviderError> {
        lock(&self.profiles)
            .get(code)
            .cloned()
            .ok_or_else(|| IdentityProviderError::rejected(format!("unknown code {code}")))
    }
}

//! Verification of payment confirmation signatures.
//!
//! The payment collaborator signs a confirmation as hex-encoded
//! HMAC-SHA256 over `"{order_id}|{payment_id}"`, keyed by the merchant's key
//! secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of checking a confirmation against the signature policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// A signature was required but not supplied.
    #[error("payment signature missing")]
    Missing,
    /// The supplied signature did not verify.
    #[error("payment signature invalid")]
    Invalid,
}

/// Signature checks applied before a confirmation may change an order.
///
/// # Examples
/// ```
/// use studio_backend::domain::PaymentSignaturePolicy;
///
/// let policy = PaymentSignaturePolicy::new("secret", false);
/// assert!(policy.check("order_1", "pay_1", None).is_ok());
/// assert!(policy.check("order_1", "pay_1", Some("deadbeef")).is_err());
/// ```
#[derive(Clone)]
pub struct PaymentSignaturePolicy {
    secret: Option<Zeroizing<String>>,
    required: bool,
}

impl PaymentSignaturePolicy {
    /// Build a policy keyed by `secret`. When `required` is false an absent
    /// signature is accepted, while a present one must still verify.
    pub fn new(secret: impl Into<String>, required: bool) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then(|| Zeroizing::new(secret)),
            required,
        }
    }

    /// Accept every confirmation; used when no key secret is configured.
    pub fn disabled() -> Self {
        Self {
            secret: None,
            required: false,
        }
    }

    /// Check a confirmation against this policy.
    pub fn check(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        match (signature.map(str::trim).filter(|s| !s.is_empty()), &self.secret) {
            (None, _) if self.required => Err(SignatureError::Missing),
            (None, _) => Ok(()),
            (Some(_), None) if !self.required => Ok(()),
            (Some(_), None) => Err(SignatureError::Invalid),
            (Some(signature), Some(secret)) => verify(secret, order_id, payment_id, signature),
        }
    }
}

impl std::fmt::Debug for PaymentSignaturePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentSignaturePolicy")
            .field("secret_configured", &self.secret.is_some())
            .field("required", &self.required)
            .finish()
    }
}

fn verify(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), SignatureError> {
    let expected = hex::decode(signature).map_err(|_| SignatureError::Invalid)?;
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::Invalid)?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Invalid)
}

/// Compute the hex signature for a confirmation. Used by tests and fixtures.
pub fn sign_confirmation(secret: &str, order_id: &str, payment_id: &str) -> String {
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mut mac) => {
            mac.update(format!("{order_id}|{payment_id}").as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        // HMAC accepts keys of any length.
        Err(_) => String::new(),
    }
}

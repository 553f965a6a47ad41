//! Payment-intent orders and their status lifecycle.
//!
//! An order is created in [`OrderStatus::Created`] once the payment
//! collaborator has accepted the intent, and transitions exactly once to
//! [`OrderStatus::Paid`] when a confirmation is reconciled.
//!
//! ## Invariants
//! - `Created → Paid` is the only transition; `Paid` is terminal.
//! - `payment_id` is absent while `Created` and present once `Paid`.
//! - `amount` is fixed at creation time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::EmailAddress;

/// Validation errors returned by order constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderValidationError {
    /// Amount was NaN or infinite.
    #[error("amount must be a finite number")]
    NonFiniteAmount,
    /// Amount was zero or negative, or rounds down to zero minor units.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    /// Amount is too large to express in minor units.
    #[error("amount {0} is too large")]
    AmountTooLarge(f64),
    /// Project label was blank once trimmed.
    #[error("project name must not be empty")]
    EmptyProjectName,
    /// Collaborator-issued identifier was blank.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),
    /// Stored status text did not match a known status.
    #[error("unknown order status '{0}'")]
    UnknownStatus(String),
    /// Stored status and payment id disagree.
    #[error("order status {status} is inconsistent with payment id presence")]
    InconsistentPayment { status: OrderStatus },
}

/// Errors raised when applying a status transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderTransitionError {
    /// The order is already `Paid`.
    #[error("order {0} is already paid")]
    AlreadyPaid(String),
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    /// Intent opened with the payment collaborator, not yet confirmed.
    Created,
    /// Confirmation reconciled.
    Paid,
}

impl OrderStatus {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Created" => Ok(Self::Created),
            "Paid" => Ok(Self::Paid),
            other => Err(OrderValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Positive amount in major currency units.
///
/// # Examples
/// ```
/// use studio_backend::domain::Amount;
///
/// let amount = Amount::new(1500.0).unwrap();
/// assert_eq!(amount.minor_units(), 150_000);
/// assert_eq!(Amount::new(19.999).unwrap().minor_units(), 1_999);
/// assert!(Amount::new(0.004).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount {
    major: f64,
    minor: i64,
}

/// Largest accepted amount in major units; keeps minor units well inside `i64`.
const MAX_MAJOR_AMOUNT: f64 = 1.0e12;

impl Amount {
    /// Validate an amount and derive its minor units as `floor(amount * 100)`.
    pub fn new(major: f64) -> Result<Self, OrderValidationError> {
        if !major.is_finite() {
            return Err(OrderValidationError::NonFiniteAmount);
        }
        if major <= 0.0 {
            return Err(OrderValidationError::NonPositiveAmount(major));
        }
        if major > MAX_MAJOR_AMOUNT {
            return Err(OrderValidationError::AmountTooLarge(major));
        }
        let minor = (major * 100.0).floor() as i64;
        if minor < 1 {
            return Err(OrderValidationError::NonPositiveAmount(major));
        }
        Ok(Self { major, minor })
    }

    /// Amount in major currency units, as requested.
    pub fn major(self) -> f64 {
        self.major
    }

    /// Amount in minor currency units sent to the payment collaborator.
    pub fn minor_units(self) -> i64 {
        self.minor
    }
}

impl TryFrom<f64> for Amount {
    type Error = OrderValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.major
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)
    }
}

macro_rules! external_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate a collaborator-issued identifier.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, OrderValidationError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(OrderValidationError::EmptyIdentifier($label));
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = OrderValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

external_identifier!(
    /// Order identifier issued by the payment collaborator; unique per order.
    ExternalOrderId,
    "order id"
);

external_identifier!(
    /// Payment identifier issued by the payment collaborator on confirmation.
    PaymentId,
    "payment id"
);

/// Project or purpose label attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a project label.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OrderValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OrderValidationError::EmptyProjectName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Payment-intent order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    order_id: ExternalOrderId,
    user_email: EmailAddress,
    project_name: ProjectName,
    amount: Amount,
    status: OrderStatus,
    payment_id: Option<PaymentId>,
    created_at: DateTime<Utc>,
}

/// Stored parts used to rebuild an [`Order`].
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub id: Uuid,
    pub order_id: ExternalOrderId,
    pub user_email: EmailAddress,
    pub project_name: ProjectName,
    pub amount: Amount,
    pub status: OrderStatus,
    pub payment_id: Option<PaymentId>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a freshly created order for an accepted payment intent.
    pub fn created(
        order_id: ExternalOrderId,
        user_email: EmailAddress,
        project_name: ProjectName,
        amount: Amount,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            user_email,
            project_name,
            amount,
            status: OrderStatus::Created,
            payment_id: None,
            created_at,
        }
    }

    /// Rebuild an order from storage, enforcing the status/payment invariant.
    pub fn restore(draft: OrderDraft) -> Result<Self, OrderValidationError> {
        let OrderDraft {
            id,
            order_id,
            user_email,
            project_name,
            amount,
            status,
            payment_id,
            created_at,
        } = draft;
        let consistent = match status {
            OrderStatus::Created => payment_id.is_none(),
            OrderStatus::Paid => payment_id.is_some(),
        };
        if !consistent {
            return Err(OrderValidationError::InconsistentPayment { status });
        }
        Ok(Self {
            id,
            order_id,
            user_email,
            project_name,
            amount,
            status,
            payment_id,
            created_at,
        })
    }

    /// Apply the `Created → Paid` transition.
    pub fn mark_paid(mut self, payment_id: PaymentId) -> Result<Self, OrderTransitionError> {
        if self.status == OrderStatus::Paid {
            return Err(OrderTransitionError::AlreadyPaid(self.order_id.to_string()));
        }
        self.status = OrderStatus::Paid;
        self.payment_id = Some(payment_id);
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn order_id(&self) -> &ExternalOrderId {
        &self.order_id
    }

    pub fn user_email(&self) -> &EmailAddress {
        &self.user_email
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_id(&self) -> Option<&PaymentId> {
        self.payment_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

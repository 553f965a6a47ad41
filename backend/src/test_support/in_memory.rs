//! In-memory repositories mirroring the PostgreSQL adapters' semantics.
//!
//! Each store sits behind one `Mutex`, which gives the same serialisation the
//! database provides for the guarded order transition and the first-login
//! upsert.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ContactRepository, InquiryPersistenceError, MaintenanceRepository, MarkPaidOutcome,
    OrderPersistenceError, OrderRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Contact, EmailAddress, ExternalOrderId, MaintenanceRequest, Order, OrderStatus, PaymentId,
    User,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Users keyed by email, insertion ordered.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Snapshot of stored users.
    pub fn all(&self) -> Vec<User> {
        lock(&self.users).clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn insert_if_absent(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut users = lock(&self.users);
        if let Some(existing) = users.iter().find(|stored| stored.email() == user.email()) {
            return Ok(existing.clone());
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.all())
    }
}

/// Orders in insertion order with a unique external identifier.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderRepository {
    /// Snapshot of stored orders.
    pub fn all(&self) -> Vec<Order> {
        lock(&self.orders).clone()
    }

    /// Stored order with `order_id`, if any.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        lock(&self.orders)
            .iter()
            .find(|order| order.order_id().as_ref() == order_id)
            .cloned()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderPersistenceError> {
        let mut orders = lock(&self.orders);
        if orders
            .iter()
            .any(|stored| stored.order_id() == order.order_id())
        {
            return Err(OrderPersistenceError::duplicate(order.order_id().to_string()));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn mark_paid(
        &self,
        order_id: &ExternalOrderId,
        payment_id: &PaymentId,
    ) -> Result<MarkPaidOutcome, OrderPersistenceError> {
        let mut orders = lock(&self.orders);
        let Some(slot) = orders.iter_mut().find(|order| order.order_id() == order_id) else {
            return Ok(MarkPaidOutcome::NotFound);
        };
        if slot.status() == OrderStatus::Paid {
            return Ok(MarkPaidOutcome::AlreadyPaid(slot.clone()));
        }
        let paid = slot
            .clone()
            .mark_paid(payment_id.clone())
            .map_err(|err| OrderPersistenceError::query(err.to_string()))?;
        *slot = paid.clone();
        Ok(MarkPaidOutcome::Transitioned(paid))
    }

    async fn list_for_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut owned: Vec<Order> = lock(&self.orders)
            .iter()
            .filter(|order| order.user_email() == email)
            .cloned()
            .collect();
        owned.sort_by_key(|order| std::cmp::Reverse(order.created_at()));
        Ok(owned)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        Ok(self.all())
    }
}

/// Contact inquiries in submission order.
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    /// Snapshot of stored contacts.
    pub fn all(&self) -> Vec<Contact> {
        lock(&self.contacts).clone()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), InquiryPersistenceError> {
        lock(&self.contacts).push(contact.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Contact>, InquiryPersistenceError> {
        Ok(self.all())
    }
}

/// Maintenance requests in submission order.
#[derive(Default)]
pub struct InMemoryMaintenanceRepository {
    requests: Mutex<Vec<MaintenanceRequest>>,
}

impl InMemoryMaintenanceRepository {
    /// Snapshot of stored requests.
    pub fn all(&self) -> Vec<MaintenanceRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryMaintenanceRepository {
    async fn insert(&self, request: &MaintenanceRequest) -> Result<(), InquiryPersistenceError> {
        lock(&self.requests).push(request.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MaintenanceRequest>, InquiryPersistenceError> {
        Ok(self.all())
    }
}

//! PostgreSQL-backed `OrderRepository`.
//!
//! The `Created → Paid` transition is one conditional `UPDATE … RETURNING`.
//! Postgres row locking serialises concurrent confirmations, so exactly one
//! caller gets a row back; the rest fall through to a read that tells
//! `AlreadyPaid` from `NotFound`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MarkPaidOutcome, OrderPersistenceError, OrderRepository};
use crate::domain::{EmailAddress, ExternalOrderId, Order, OrderStatus, PaymentId};

use super::diesel_error_mapping::{
    describe_corrupt_row, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::OrderRow;
use super::pool::{DbPool, PoolError};
use super::schema::orders;

const ORDER_ID_UNIQUE: &str = "orders_order_id_key";

/// Diesel implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> OrderPersistenceError {
    map_pool_error(error, OrderPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OrderPersistenceError {
    map_diesel_error(
        error,
        OrderPersistenceError::query,
        OrderPersistenceError::connection,
    )
}

fn to_domain(row: OrderRow) -> Result<Order, OrderPersistenceError> {
    Order::try_from(row).map_err(|err| OrderPersistenceError::query(describe_corrupt_row(&err)))
}

fn to_domain_all(rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderPersistenceError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(orders::table)
            .values(OrderRow::from(order))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err, ORDER_ID_UNIQUE) {
                    OrderPersistenceError::duplicate(order.order_id().to_string())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn mark_paid(
        &self,
        order_id: &ExternalOrderId,
        payment_id: &PaymentId,
    ) -> Result<MarkPaidOutcome, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(
            orders::table
                .filter(orders::order_id.eq(order_id.as_ref()))
                .filter(orders::status.eq(OrderStatus::Created.as_str())),
        )
        .set((
            orders::status.eq(OrderStatus::Paid.as_str()),
            orders::payment_id.eq(Some(payment_id.as_ref())),
        ))
        .returning(OrderRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(diesel_error)?;

        if let Some(row) = updated {
            return to_domain(row).map(MarkPaidOutcome::Transitioned);
        }

        let existing = orders::table
            .filter(orders::order_id.eq(order_id.as_ref()))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        match existing {
            Some(row) => to_domain(row).map(MarkPaidOutcome::AlreadyPaid),
            None => Ok(MarkPaidOutcome::NotFound),
        }
    }

    async fn list_for_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = orders::table
            .filter(orders::user_email.eq(email.as_ref()))
            .order(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_domain_all(rows)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = orders::table
            .order(orders::created_at.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_domain_all(rows)
    }
}

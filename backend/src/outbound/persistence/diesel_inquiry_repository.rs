//! PostgreSQL-backed contact and maintenance repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactRepository, InquiryPersistenceError, MaintenanceRepository};
use crate::domain::{Contact, MaintenanceRequest};

use super::diesel_error_mapping::{describe_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{ContactRow, CorruptRow, MaintenanceRow};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, maintenance_requests};

fn pool_error(error: PoolError) -> InquiryPersistenceError {
    map_pool_error(error, InquiryPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> InquiryPersistenceError {
    map_diesel_error(
        error,
        InquiryPersistenceError::query,
        InquiryPersistenceError::connection,
    )
}

fn corrupt(error: CorruptRow) -> InquiryPersistenceError {
    InquiryPersistenceError::query(describe_corrupt_row(&error))
}

/// Diesel implementation of [`ContactRepository`].
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(contacts::table)
            .values(ContactRow::from(contact))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        contacts::table
            .order(contacts::created_at.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(|row| Contact::try_from(row).map_err(corrupt))
            .collect()
    }
}

/// Diesel implementation of [`MaintenanceRepository`].
#[derive(Clone)]
pub struct DieselMaintenanceRepository {
    pool: DbPool,
}

impl DieselMaintenanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for DieselMaintenanceRepository {
    async fn insert(&self, request: &MaintenanceRequest) -> Result<(), InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(maintenance_requests::table)
            .values(MaintenanceRow::from(request))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<MaintenanceRequest>, InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        maintenance_requests::table
            .order(maintenance_requests::created_at.asc())
            .select(MaintenanceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(|row| MaintenanceRequest::try_from(row).map_err(corrupt))
            .collect()
    }
}

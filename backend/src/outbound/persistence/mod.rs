//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between row structs (`models.rs`) and
//! domain types; rows and the schema never leave this module. Connections come
//! from a `bb8` pool through `diesel-async`, and every driver failure is
//! mapped onto the owning port's error type.
//!
//! ```ignore
//! use studio_backend::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/studio")).await?;
//! let orders = DieselOrderRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_inquiry_repository;
mod diesel_order_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_inquiry_repository::{DieselContactRepository, DieselMaintenanceRepository};
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

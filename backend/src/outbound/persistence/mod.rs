//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between row structs and domain records through
//! `diesel-async` connections checked out of a shared `bb8` pool. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module.
//!
//! # Example
//!
//! ```ignore
//! use parking::outbound::persistence::{DbPool, DieselEntryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/parking")).await?;
//! let entries = DieselEntryRepository::new(pool.clone());
//! ```

mod diesel_departure_repository;
mod diesel_entry_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_departure_repository::DieselDepartureRepository;
pub use diesel_entry_repository::DieselEntryRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

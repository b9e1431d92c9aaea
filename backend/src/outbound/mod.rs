//! Outbound adapters implementing the repository port.
//!
//! - **memory**: process-local repositories for tests and database-less runs
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters convert between domain types and storage representations. They
//! contain no business logic.

pub mod memory;
pub mod persistence;

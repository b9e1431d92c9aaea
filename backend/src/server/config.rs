//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use parking::domain::{CellCapacity, FeeSchedule, LastIssuedNumbers, RepositoryDeadline};
use parking::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) capacity: CellCapacity,
    pub(crate) last_issued: LastIssuedNumbers,
    pub(crate) fees: FeeSchedule,
    pub(crate) deadline: RepositoryDeadline,
}

impl ServerConfig {
    /// Configuration with facility defaults and in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            capacity: CellCapacity::default(),
            last_issued: LastIssuedNumbers::default(),
            fees: FeeSchedule::default(),
            deadline: RepositoryDeadline::default(),
        }
    }

    /// Store records in PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: CellCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_last_issued(mut self, last_issued: LastIssuedNumbers) -> Self {
        self.last_issued = last_issued;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: RepositoryDeadline) -> Self {
        self.deadline = deadline;
        self
    }
}

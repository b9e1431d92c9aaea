//! `bb8` pool of `diesel-async` PostgreSQL connections shared by the
//! entry and departure repositories.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

/// Pool construction and checkout failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool size and checkout limit.
///
/// The checkout timeout bounds how long a repository call waits for a free
/// connection. Start-up sets it to the repository deadline.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Defaults to ten connections and a five second checkout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            checkout_timeout: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }
}

/// Shared async connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool and open its first connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the database cannot be reached.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up before the
    /// checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_suit_a_single_facility() {
        let config = PoolConfig::new("postgres://localhost/parking");

        assert_eq!(config.database_url, "postgres://localhost/parking");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.checkout_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn settings_override_size_and_checkout() {
        let config = PoolConfig::new("postgres://localhost/parking")
            .with_max_size(4)
            .with_checkout_timeout(Duration::from_millis(750));

        assert_eq!(config.max_size, 4);
        assert_eq!(config.checkout_timeout, Duration::from_millis(750));
    }

    #[rstest]
    #[case(PoolError::checkout("connection refused"), "failed to get connection from pool: connection refused")]
    #[case(PoolError::build("invalid URL"), "failed to build connection pool: invalid URL")]
    fn errors_render_their_cause(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}

//! Plumbing shared by the entry and departure services.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use super::Error;
use super::ports::{CellQuotaError, RepositoryError};

/// Default bound on a single repository call.
pub const DEFAULT_REPOSITORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Serialises check-then-create sequences across both services.
///
/// Clones share the same lock, so hand one gate to every service that
/// reads occupancy before writing.
#[derive(Debug, Clone, Default)]
pub struct RegistrationGate(Arc<Mutex<()>>);

impl RegistrationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn enter(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}

/// Upper bound applied to every repository call made by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryDeadline(Duration);

impl Default for RepositoryDeadline {
    fn default() -> Self {
        Self(DEFAULT_REPOSITORY_TIMEOUT)
    }
}

impl RepositoryDeadline {
    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub fn limit(self) -> Duration {
        self.0
    }

    /// Await `call`, failing with an internal error once the limit passes.
    pub(crate) async fn run<T, E, F>(self, operation: &'static str, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Error>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                tracing::warn!(operation, timeout_ms = self.millis(), "repository call timed out");
                Err(Error::internal(format!(
                    "{operation} timed out after {}ms",
                    self.millis()
                )))
            }
        }
    }

    fn millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => {
                Self::internal(format!("repository unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Self::internal(format!("repository error: {message}"))
            }
            RepositoryError::Conflict { message } => {
                Self::internal(format!("repository conflict: {message}"))
            }
        }
    }
}

impl From<CellQuotaError> for Error {
    fn from(error: CellQuotaError) -> Self {
        Self::internal(error.to_string())
    }
}

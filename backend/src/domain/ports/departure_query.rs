//! Driving port for reading vehicle departures.

use async_trait::async_trait;

use crate::domain::Error;

use super::departure_command::DeparturePayload;

/// Driving port for departure read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartureQuery: Send + Sync {
    /// Every departure ordered by departure time.
    async fn list_departures(&self) -> Result<Vec<DeparturePayload>, Error>;

    /// Departure by identifier; `None` for unknown or malformed ids.
    async fn get_departure_by_id(&self, id: &str) -> Result<Option<DeparturePayload>, Error>;
}

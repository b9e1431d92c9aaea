//! Driving port for registering vehicle departures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Departure, Error};

/// Serializable departure payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturePayload {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub departed_at: DateTime<Utc>,
    pub fee: u64,
}

impl From<Departure> for DeparturePayload {
    fn from(value: Departure) -> Self {
        Self {
            id: value.id(),
            entry_id: value.entry_id(),
            departed_at: value.departed_at(),
            fee: value.fee().amount(),
        }
    }
}

/// Request to register a vehicle exit.
///
/// The entry is named directly by `entry_id`, or resolved from the open
/// entry of `vehicle_id`. `entry_id` wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDepartureRequest {
    pub entry_id: Option<String>,
    pub vehicle_id: Option<String>,
}

/// Driving port for departure write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartureCommand: Send + Sync {
    /// Closes an entry, computing its fee.
    ///
    /// Fails with [`crate::domain::ErrorCode::DepartureValidation`] when the
    /// entry does not exist or already has a departure.
    async fn register_departure(
        &self,
        request: RegisterDepartureRequest,
    ) -> Result<DeparturePayload, Error>;
}

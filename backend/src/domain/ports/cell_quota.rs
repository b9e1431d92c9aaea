//! Port answering whether a free parking cell exists for a vehicle type.

use async_trait::async_trait;

use crate::domain::VehicleType;

use super::{RepositoryError, define_port_error};

define_port_error! {
    /// Errors raised while computing cell availability.
    pub enum CellQuotaError {
        /// Occupancy could not be read.
        Unavailable => "cell quota lookup failed",
    }
}

impl From<RepositoryError> for CellQuotaError {
    fn from(error: RepositoryError) -> Self {
        Self::unavailable(error.to_string())
    }
}

/// Port for capacity checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CellQuota: Send + Sync {
    /// Whether at least one cell is free for `vehicle_type`.
    async fn exists_quota_by_vehicle_type(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<bool, CellQuotaError>;
}

/// Fixture quota with a fixed answer for every vehicle type.
#[derive(Debug, Clone, Copy)]
pub struct FixtureCellQuota {
    pub available: bool,
}

impl Default for FixtureCellQuota {
    fn default() -> Self {
        Self { available: true }
    }
}

#[async_trait]
impl CellQuota for FixtureCellQuota {
    async fn exists_quota_by_vehicle_type(
        &self,
        _vehicle_type: VehicleType,
    ) -> Result<bool, CellQuotaError> {
        Ok(self.available)
    }
}

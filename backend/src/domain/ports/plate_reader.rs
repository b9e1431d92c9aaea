//! Port for reading the sequence number out of a vehicle identifier.

use crate::domain::{SequenceNumber, VehicleType};

/// Reads plates according to the rule of a vehicle type.
#[cfg_attr(test, mockall::automock)]
pub trait PlateReader: Send + Sync {
    /// Sequence number of `vehicle_id`, or `None` when the identifier does
    /// not satisfy the plate rule for `vehicle_type`.
    fn last_number_of_vehicle_id(
        &self,
        vehicle_type: VehicleType,
        vehicle_id: &str,
    ) -> Option<SequenceNumber>;
}

//! Vehicle classification shared by entries, quotas, plates and fees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of vehicle admitted by the facility.
///
/// The type selects the quota pool, the plate rule, the rate table, and
/// whether an engine displacement is mandatory on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

impl VehicleType {
    /// Every admitted vehicle type, in a stable order.
    pub const ALL: [Self; 2] = [Self::Car, Self::Motorcycle];

    /// Stable lower-case name used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
        }
    }

    /// Whether entries of this type must declare an engine displacement.
    pub const fn requires_displacement(self) -> bool {
        matches!(self, Self::Motorcycle)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "motorcycle" => Ok(Self::Motorcycle),
            _ => Err(UnknownVehicleType(s.to_owned())),
        }
    }
}

/// Canonical form of a vehicle identifier: trimmed and upper-cased.
///
/// # Examples
/// ```
/// use parking::domain::normalize_vehicle_id;
///
/// assert_eq!(normalize_vehicle_id("  sfl555 "), "SFL555");
/// ```
pub fn normalize_vehicle_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

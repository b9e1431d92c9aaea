//! Plate rule: vehicle-type-specific identifier format and sequence check.
//!
//! Cars carry three letters followed by three digits (`SFL555`); motorcycles
//! carry three letters, two digits and a trailing letter (`SFL55D`). The
//! digit group is the plate's sequence number. Plates are issued in
//! ascending order, so a sequence number above the last one issued for the
//! type cannot belong to a real plate.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ports::PlateReader;
use super::vehicle::{VehicleType, normalize_vehicle_id};

static CAR_PLATE_RE: OnceLock<Regex> = OnceLock::new();
static MOTORCYCLE_PLATE_RE: OnceLock<Regex> = OnceLock::new();

fn plate_regex(vehicle_type: VehicleType) -> &'static Regex {
    let (cell, pattern) = match vehicle_type {
        VehicleType::Car => (&CAR_PLATE_RE, r"^[A-Z]{3}(?P<sequence>[0-9]{3})$"),
        VehicleType::Motorcycle => (&MOTORCYCLE_PLATE_RE, r"^[A-Z]{3}(?P<sequence>[0-9]{2})[A-Z]$"),
    };
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("plate regex failed to compile: {error}"))
    })
}

/// Numeric part of a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(u32);

impl SequenceNumber {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons a vehicle identifier fails the plate rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlateValidationError {
    #[error("{vehicle_id} does not match the {vehicle_type} plate format")]
    FormatMismatch {
        vehicle_type: VehicleType,
        vehicle_id: String,
    },
    #[error("sequence {number} exceeds the last issued {vehicle_type} plate number {last_issued}")]
    BeyondLastIssued {
        vehicle_type: VehicleType,
        number: SequenceNumber,
        last_issued: SequenceNumber,
    },
}

/// Highest plate sequence number issued so far, per vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastIssuedNumbers {
    pub car: SequenceNumber,
    pub motorcycle: SequenceNumber,
}

impl Default for LastIssuedNumbers {
    fn default() -> Self {
        Self {
            car: SequenceNumber(999),
            motorcycle: SequenceNumber(99),
        }
    }
}

/// Checks identifiers against the plate rule of their vehicle type.
///
/// # Examples
/// ```
/// use parking::domain::{PlateValidator, VehicleType};
///
/// let plates = PlateValidator::default();
/// assert!(plates.validate(VehicleType::Car, "SFL555").is_ok());
/// assert!(plates.validate(VehicleType::Motorcycle, "SFL555").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlateValidator {
    last_issued: LastIssuedNumbers,
}

impl PlateValidator {
    pub fn new(last_issued: LastIssuedNumbers) -> Self {
        Self { last_issued }
    }

    /// Validate `vehicle_id` for `vehicle_type` and return its sequence number.
    pub fn validate(
        &self,
        vehicle_type: VehicleType,
        vehicle_id: &str,
    ) -> Result<SequenceNumber, PlateValidationError> {
        let candidate = normalize_vehicle_id(vehicle_id);
        let mismatch = || PlateValidationError::FormatMismatch {
            vehicle_type,
            vehicle_id: candidate.clone(),
        };

        let number = plate_regex(vehicle_type)
            .captures(&candidate)
            .and_then(|caps| caps.name("sequence"))
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .map(SequenceNumber)
            .ok_or_else(mismatch)?;

        let last_issued = match vehicle_type {
            VehicleType::Car => self.last_issued.car,
            VehicleType::Motorcycle => self.last_issued.motorcycle,
        };
        if number > last_issued {
            return Err(PlateValidationError::BeyondLastIssued {
                vehicle_type,
                number,
                last_issued,
            });
        }
        Ok(number)
    }
}

impl PlateReader for PlateValidator {
    fn last_number_of_vehicle_id(
        &self,
        vehicle_type: VehicleType,
        vehicle_id: &str,
    ) -> Option<SequenceNumber> {
        self.validate(vehicle_type, vehicle_id).ok()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn plates() -> PlateValidator {
        PlateValidator::default()
    }

    #[rstest]
    #[case(VehicleType::Car, "SFL555", 555)]
    #[case(VehicleType::Car, "abc012", 12)]
    #[case(VehicleType::Motorcycle, "SFL55D", 55)]
    #[case(VehicleType::Motorcycle, " xyz07a ", 7)]
    fn extracts_sequence_numbers(
        plates: PlateValidator,
        #[case] vehicle_type: VehicleType,
        #[case] vehicle_id: &str,
        #[case] expected: u32,
    ) {
        let number = plates
            .validate(vehicle_type, vehicle_id)
            .expect("plate matches its rule");
        assert_eq!(number, SequenceNumber::new(expected));
    }

    #[rstest]
    #[case(VehicleType::Motorcycle, "SFL555")]
    #[case(VehicleType::Car, "SFL55A")]
    #[case(VehicleType::Car, "SF555")]
    #[case(VehicleType::Car, "SFL5555")]
    #[case(VehicleType::Motorcycle, "SF55DD")]
    #[case(VehicleType::Car, "")]
    fn rejects_mismatched_formats(
        plates: PlateValidator,
        #[case] vehicle_type: VehicleType,
        #[case] vehicle_id: &str,
    ) {
        let err = plates
            .validate(vehicle_type, vehicle_id)
            .expect_err("plate violates its rule");
        assert!(matches!(err, PlateValidationError::FormatMismatch { .. }));
    }

    #[rstest]
    fn rejects_numbers_beyond_last_issued() {
        let plates = PlateValidator::new(LastIssuedNumbers {
            car: SequenceNumber::new(500),
            motorcycle: SequenceNumber::new(99),
        });

        assert!(plates.validate(VehicleType::Car, "SFL500").is_ok());
        let err = plates
            .validate(VehicleType::Car, "SFL555")
            .expect_err("555 was never issued");
        assert_eq!(
            err,
            PlateValidationError::BeyondLastIssued {
                vehicle_type: VehicleType::Car,
                number: SequenceNumber::new(555),
                last_issued: SequenceNumber::new(500),
            }
        );
    }

    #[rstest]
    fn reader_returns_none_for_invalid_plates(plates: PlateValidator) {
        assert_eq!(
            plates.last_number_of_vehicle_id(VehicleType::Car, "SFL55A"),
            None
        );
        assert_eq!(
            plates.last_number_of_vehicle_id(VehicleType::Car, "SFL555"),
            Some(SequenceNumber::new(555))
        );
    }
}

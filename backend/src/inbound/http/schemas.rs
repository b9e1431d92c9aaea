//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and register under the domain
//! type's name. They derive `Serialize` only so the serde renames apply.

use serde::Serialize;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The entry request breaks a registration rule.
    #[schema(rename = "entry_validation")]
    EntryValidation,
    /// No free cell for the vehicle type.
    #[schema(rename = "capacity")]
    Capacity,
    /// The departure request breaks a registration rule.
    #[schema(rename = "departure_validation")]
    DepartureValidation,
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected failure; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "capacity")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "No hay cupos disponibles")]
    message: String,
    /// Correlation identifier of the failed request.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "entry_validation",
            "capacity",
            "departure_validation",
            "invalid_request",
            "not_found",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"), "schema should use camelCase");
    }
}

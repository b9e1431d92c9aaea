//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. The registration
//! taxonomy (`EntryValidation`, `Capacity`, `DepartureValidation`) carries
//! user-facing Spanish messages that form part of the external contract; see
//! [`messages`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// User-facing messages of the registration taxonomy.
///
/// Clients match on these strings, so they must not change.
pub mod messages {
    /// A motorcycle was registered without its engine displacement.
    pub const MISSING_DISPLACEMENT: &str = "Falta la información del cilindraje de la motocicleta";
    /// No free cell exists for the requested vehicle type.
    pub const NO_CELLS_AVAILABLE: &str = "No hay cupos disponibles";
    /// The vehicle already has an entry without a departure.
    pub const PENDING_DEPARTURE: &str =
        "El vehículo que está registrando posee una salida pendiente";
    /// The vehicle identifier does not satisfy the plate rule for its type.
    pub const UNREADABLE_PLATE: &str = "Hubo un problema al leer la placa del vehículo. Verifique el tipo de vehículo e intente de nuevo";
    /// The departure references an entry that does not exist.
    pub const ENTRY_NOT_FOUND: &str = "No existe una entrada registrada para la salida solicitada";
    /// The referenced entry already has a departure.
    pub const DEPARTURE_ALREADY_REGISTERED: &str = "El vehículo ya tiene una salida registrada";
}

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// An entry registration failed a business rule.
    EntryValidation,
    /// No free cell is available for the vehicle type.
    Capacity,
    /// A departure registration failed a business rule.
    DepartureValidation,
    /// The request is malformed.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain or its adapters.
    InternalError,
}

impl ErrorCode {
    /// Whether the code belongs to the registration taxonomy raised by the
    /// entry and departure services.
    pub fn is_registration_rule(self) -> bool {
        matches!(
            self,
            Self::EntryValidation | Self::Capacity | Self::DepartureValidation
        )
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Self::EntryValidation => "entry rejected",
            Self::Capacity => messages::NO_CELLS_AVAILABLE,
            Self::DepartureValidation => "departure rejected",
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `trace_id`, when present, must be non-empty.
///
/// # Examples
/// ```
/// use parking::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
    EmptyTraceId,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
            Self::EmptyTraceId => write!(f, "trace identifier must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    ///
    /// A blank message is replaced with a generic description of `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(_) => Self {
                code,
                message: code.fallback_message().to_owned(),
                trace_id: TraceId::current().map(|id| id.to_string()),
                details: None,
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier of the request that raised the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier, ignoring blank values.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.trace_id = Some(id);
        }
        self
    }

    /// Attach a trace identifier, rejecting blank values.
    pub fn try_with_trace_id(
        mut self,
        id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(id);
        Ok(self)
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use parking::domain::{Error, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = Error::new(ErrorCode::InvalidRequest, "bad")
    ///     .with_details(json!({ "field": "vehicleId" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::EntryValidation`].
    pub fn entry_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EntryValidation, message)
    }

    /// Convenience constructor for [`ErrorCode::Capacity`].
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Capacity, message)
    }

    /// Convenience constructor for [`ErrorCode::DepartureValidation`].
    pub fn departure_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DepartureValidation, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.trace_id = None;
        if let Some(id) = trace_id {
            error = error.try_with_trace_id(id)?;
        }
        error.details = details;
        Ok(error)
    }
}

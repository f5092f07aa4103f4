//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter wraps them in the
//! registry's `{"error": {...}}` envelope together with endpoint help.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The API key is absent or is not a well-formed token.
    InvalidApiKey,
    /// The API key is well formed but belongs to no registrant.
    UnauthorizedKey,
    /// A query parameter could not be coerced to the expected shape.
    InvalidParameter,
    /// The request body could not be deserialized.
    InvalidBody,
    /// The identifier does not exist or is not a valid token.
    IdentifierNotFound,
    /// A lookup was made without naming an identifier.
    MissingIdentifier,
    /// The backing store failed.
    StoreError,
    /// No route matches the request method and path.
    RouteNotFound,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use aske_id::domain::{Error, ErrorCode};
///
/// let err = Error::identifier_not_found("No such ASKE-ID");
/// assert_eq!(err.code(), ErrorCode::IdentifierNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace only.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, falling back to the code name when `message` is
    /// blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(ErrorValidationError::EmptyMessage) => Self {
                code,
                message: format!("{code:?}"),
            },
        }
    }

    /// Fallible constructor that validates the message content.
    ///
    /// # Errors
    /// Returns [`ErrorValidationError::EmptyMessage`] for blank messages.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidApiKey`].
    pub fn invalid_api_key(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidApiKey, message)
    }

    /// Convenience constructor for [`ErrorCode::UnauthorizedKey`].
    pub fn unauthorized_key(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnauthorizedKey, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidParameter`].
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidBody`].
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidBody, message)
    }

    /// Convenience constructor for [`ErrorCode::IdentifierNotFound`].
    pub fn identifier_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IdentifierNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::MissingIdentifier`].
    pub fn missing_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingIdentifier, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreError`].
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Convenience constructor for [`ErrorCode::RouteNotFound`].
    pub fn route_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RouteNotFound, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

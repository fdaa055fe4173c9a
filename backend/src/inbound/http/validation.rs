//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose `details` carry the
//! camelCase request `field` and a stable machine-readable `code`.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{CourseValidationError, Error, StudentValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    Empty,
    TooShort,
    TooLong,
    TooLarge,
    InvalidCharacters,
    InvalidEmail,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::TooLarge => "too_large",
            Self::InvalidCharacters => "invalid_characters",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ValidationCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ValidationCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ValidationCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    ValidationError::new(field, format!("{} must be a valid UUID", field.as_str()))
        .with_value(ValidationCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Map a course field failure onto the request body's field names.
pub(crate) fn course_validation_error(error: &CourseValidationError) -> Error {
    let code = match error {
        CourseValidationError::EmptyCode
        | CourseValidationError::EmptyTitle
        | CourseValidationError::EmptySemester => ValidationCode::Empty,
        CourseValidationError::CodeTooLong { .. }
        | CourseValidationError::TitleTooLong { .. }
        | CourseValidationError::SemesterTooLong { .. } => ValidationCode::TooLong,
        CourseValidationError::CreditsTooLarge { .. }
        | CourseValidationError::CapacityTooLarge { .. } => ValidationCode::TooLarge,
    };
    ValidationError::new(FieldName::new(error.field()), error.to_string()).with_code(code)
}

/// Map a registration failure onto the request body's field names.
pub(crate) fn student_validation_error(error: &StudentValidationError) -> Error {
    let code = match error {
        StudentValidationError::UsernameTooShort { .. } => ValidationCode::TooShort,
        StudentValidationError::UsernameTooLong { .. } => ValidationCode::TooLong,
        StudentValidationError::UsernameInvalidCharacters => ValidationCode::InvalidCharacters,
        StudentValidationError::InvalidEmail { .. } => ValidationCode::InvalidEmail,
    };
    ValidationError::new(FieldName::new(error.field()), error.to_string()).with_code(code)
}

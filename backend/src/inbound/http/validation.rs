//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field and a stable machine-readable code.

use serde_json::json;

use crate::domain::exercise_service::user_not_found_message;
use crate::domain::{
    Description, Error, ExerciseDate, ExerciseValidationError, LogLimit, UserId, Username,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUsername,
    InvalidDescription,
    InvalidDuration,
    InvalidDate,
    InvalidLimit,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::InvalidDescription => "invalid_description",
            ErrorCode::InvalidDuration => "invalid_duration",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidLimit => "invalid_limit",
            ErrorCode::InvalidBody => "invalid_body",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const DURATION: FieldName = FieldName::new("duration");
pub(crate) const DATE: FieldName = FieldName::new("date");
pub(crate) const FROM: FieldName = FieldName::new("from");
pub(crate) const TO: FieldName = FieldName::new("to");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_duration_error(message: impl Into<String>, value: impl Into<String>) -> Error {
    ValidationError::new(DURATION.as_str(), message).with_value(ErrorCode::InvalidDuration, value)
}

/// Malformed JSON or form payloads that never reached field validation.
pub(crate) fn invalid_body_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
}

/// Treat absent and whitespace-only values alike; HTML forms post empty
/// strings for untouched inputs.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

pub(crate) fn parse_username(value: Option<String>) -> Result<Username, Error> {
    let raw = value.ok_or_else(|| missing_field_error(USERNAME))?;
    Username::new(raw).map_err(|err| {
        ValidationError::new(USERNAME.as_str(), err.to_string()).with_code(ErrorCode::InvalidUsername)
    })
}

pub(crate) fn parse_description(value: Option<String>) -> Result<Description, Error> {
    let raw = value.ok_or_else(|| missing_field_error(DESCRIPTION))?;
    Description::new(raw).map_err(|err| {
        ValidationError::new(DESCRIPTION.as_str(), err.to_string())
            .with_code(ErrorCode::InvalidDescription)
    })
}

/// Parse an optional date field; blank input counts as absent.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<ExerciseDate>, Error> {
    non_blank(value)
        .map(|raw| {
            ExerciseDate::parse(&raw).map_err(|err| {
                let message = match err {
                    ExerciseValidationError::InvalidDate { .. } => format!(
                        "{} must be a date such as 2024-01-01",
                        field.as_str()
                    ),
                    other => other.to_string(),
                };
                ValidationError::new(field.as_str(), message).with_value(ErrorCode::InvalidDate, raw)
            })
        })
        .transpose()
}

/// Parse an optional `limit`; blank input counts as absent.
pub(crate) fn parse_optional_limit(value: Option<String>) -> Result<Option<LogLimit>, Error> {
    non_blank(value)
        .map(|raw| {
            LogLimit::parse(&raw).map_err(|err| {
                ValidationError::new(LIMIT.as_str(), err.to_string())
                    .with_value(ErrorCode::InvalidLimit, raw)
            })
        })
        .transpose()
}

/// Resolve the `_id` path segment. Text that is not a UUID cannot name a
/// stored user, so it is reported exactly like an unknown id.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(user_not_found_message(raw)))
}

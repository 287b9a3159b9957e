//! Shared validation helpers for the inbound HTTP adapter.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes attached to 400 responses for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    UnknownActionType,
    InvalidCoordinate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::UnknownActionType => "unknown_action_type",
            Self::InvalidCoordinate => "invalid_coordinate",
        }
    }
}

/// Newtype wrapper for HTTP field names to keep call sites type safe.
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

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn unknown_action_type_error(value: &str) -> Error {
    Error::invalid_request(
        "actionType must be one of tree_planted, plastic_avoided, water_saved, energy_saved",
    )
    .with_details(json!({
        "field": "actionType",
        "value": value,
        "code": ErrorCode::UnknownActionType.as_str(),
    }))
}

pub(crate) fn invalid_coordinate_error(field: FieldName, message: impl Into<String>) -> Error {
    let field = field.as_str();
    Error::invalid_request(message.into()).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidCoordinate.as_str(),
    }))
}

/// Require a present field, mapping `None` to a 400 error.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

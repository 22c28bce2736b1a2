//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{BookValidationError, Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidJson => "invalid_json",
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
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Body deserialisation failures, surfaced through the JSON extractor config.
pub(crate) fn invalid_json_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("request body must be a JSON object").with_details(json!({
        "code": ErrorCode::InvalidJson.as_str(),
        "reason": reason.to_string(),
    }))
}

pub(crate) fn map_book_validation_error(err: BookValidationError) -> Error {
    match err {
        BookValidationError::MissingField(field) => {
            missing_field_error(FieldName::new(field.as_str()))
        }
    }
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::MissingUsername => missing_field_error(FieldName::new("username")),
        UserValidationError::MissingPassword => missing_field_error(FieldName::new("password")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookField;
    use rstest::rstest;

    #[rstest]
    #[case(BookField::User, "user")]
    #[case(BookField::Content, "content")]
    fn book_validation_names_field(#[case] field: BookField, #[case] name: &str) {
        let err = map_book_validation_error(BookValidationError::MissingField(field));

        assert_eq!(err.message(), format!("missing required field: {name}"));
        assert_eq!(
            err.details(),
            Some(&json!({ "field": name, "code": "missing_field" }))
        );
    }

    #[rstest]
    fn missing_password_names_field() {
        let err = map_user_validation_error(UserValidationError::MissingPassword);

        assert_eq!(
            err.details(),
            Some(&json!({ "field": "password", "code": "missing_field" }))
        );
    }

    #[rstest]
    fn invalid_json_is_a_bad_request() {
        let err = invalid_json_error("expected value at line 1 column 1");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}

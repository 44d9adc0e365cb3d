//! Composer error types.
//!
//! Structural errors (`ComposerError`) are raised immediately and never
//! retried: the same input against the same registry always reproduces them.
//! Publish validation problems (`ValidationError`) are returned as data.

use std::fmt;

use postwright_sdk::types::FieldKind;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the block-type registry and the composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    /// A block type with this key is already registered.
    #[error("block type '{key}' is already registered")]
    DuplicateKey { key: String },

    /// A block type declares the same field key twice.
    #[error("block type '{type_key}': field '{field_key}' is declared more than once")]
    DuplicateField { type_key: String, field_key: String },

    /// A stored block references a type that is not registered.
    #[error("block {index}: unknown block type '{type_key}'")]
    UnknownBlockType { index: usize, type_key: String },

    /// A stored block carries a field its block type does not declare.
    #[error("block {index} ({type_key}): field '{field_key}' is not part of the block type schema")]
    SchemaMismatch {
        index: usize,
        type_key: String,
        field_key: String,
    },

    /// A stored value does not have the shape its field kind accepts.
    #[error("block {index} ({type_key}): field '{field_key}' is not a valid {kind} value")]
    InvalidFieldValue {
        index: usize,
        type_key: String,
        field_key: String,
        kind: FieldKind,
    },

    /// The process-wide registry has already been installed.
    #[error("block type registry is frozen; it can only be installed once")]
    RegistryFrozen,
}

/// Result type alias using ComposerError.
pub type ComposerResult<T> = Result<T, ComposerError>;

/// What went wrong with a single block during publish validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field is absent or empty.
    MissingRequired,
    /// A value does not match its field kind.
    InvalidValue,
    /// The block names a type that is not registered.
    UnknownBlockType,
}

/// A publish-time problem with one block instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Position of the instance in the validated sequence (0-based).
    pub instance_index: usize,
    /// Offending field; None for block-level problems.
    pub field_key: Option<String>,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn missing_required(instance_index: usize, field_key: &str) -> Self {
        Self {
            instance_index,
            field_key: Some(field_key.to_string()),
            kind: ValidationErrorKind::MissingRequired,
        }
    }

    pub fn invalid_value(instance_index: usize, field_key: &str) -> Self {
        Self {
            instance_index,
            field_key: Some(field_key.to_string()),
            kind: ValidationErrorKind::InvalidValue,
        }
    }

    pub fn unknown_block_type(instance_index: usize) -> Self {
        Self {
            instance_index,
            field_key: None,
            kind: ValidationErrorKind::UnknownBlockType,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based numbering for user-facing messages
        let pos = self.instance_index + 1;
        match (self.kind, self.field_key.as_deref()) {
            (ValidationErrorKind::MissingRequired, Some(field)) => {
                write!(f, "section {pos}: '{field}' is required")
            }
            (ValidationErrorKind::InvalidValue, Some(field)) => {
                write!(f, "section {pos}: '{field}' has an invalid value")
            }
            (ValidationErrorKind::UnknownBlockType, _) | (_, None) => {
                write!(f, "section {pos}: unknown block type")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn composer_error_messages_name_the_block() {
        let err = ComposerError::SchemaMismatch {
            index: 2,
            type_key: "image".to_string(),
            field_key: "width".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "block 2 (image): field 'width' is not part of the block type schema"
        );

        let err = ComposerError::InvalidFieldValue {
            index: 0,
            type_key: "text".to_string(),
            field_key: "text_content".to_string(),
            kind: FieldKind::RichText,
        };
        assert!(err.to_string().contains("not a valid rich-text value"));
    }

    #[test]
    fn validation_error_display_is_one_based() {
        let err = ValidationError::missing_required(0, "image");
        assert_eq!(err.to_string(), "section 1: 'image' is required");
        assert_eq!(
            ValidationError::unknown_block_type(4).to_string(),
            "section 5: unknown block type"
        );
    }

    #[test]
    fn validation_error_serializes_kind_snake_case() {
        let json = serde_json::to_value(ValidationError::missing_required(1, "alt")).unwrap();
        assert_eq!(json["kind"], "missing_required");
        assert_eq!(json["field_key"], "alt");
        assert_eq!(json["instance_index"], 1);
    }
}

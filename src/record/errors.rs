//! Record lookup errors
//!
//! `FieldNotFound` is the one condition callers are expected to handle: a field
//! that some exporter versions omit. [`OptionalField::optional`] turns it into
//! `None` and lets every other error through.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Named field is absent from this record
    #[error("Field not found: '{field}' (under '{path}')")]
    FieldNotFound { field: String, path: String },

    /// A text value was requested from a struct or sequence
    #[error("Expected a text value at '{path}'")]
    NotALeaf { path: String },

    /// A field was requested from a text value
    #[error("Expected a struct or sequence at '{path}'")]
    NotAContainer { path: String },

    /// Leaf text is not a number
    #[error("Invalid number '{value}' at '{path}'")]
    InvalidNumber { path: String, value: String },
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Marks a lookup as expected-absent.
pub trait OptionalField<T> {
    /// `FieldNotFound` becomes `Ok(None)`; other errors propagate.
    fn optional(self) -> RecordResult<Option<T>>;
}

impl<T> OptionalField<T> for RecordResult<T> {
    fn optional(self) -> RecordResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(RecordError::FieldNotFound { field, path }) => {
                log::debug!("Optional field '{}' absent under '{}'", field, path);
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_absorbs_only_field_not_found() {
        let missing: RecordResult<i64> = Err(RecordError::FieldNotFound {
            field: "alignment".into(),
            path: "character".into(),
        });
        assert_eq!(missing.optional(), Ok(None));

        let present: RecordResult<i64> = Ok(3);
        assert_eq!(present.optional(), Ok(Some(3)));

        let bad: RecordResult<i64> = Err(RecordError::InvalidNumber {
            path: "profbonus".into(),
            value: "two".into(),
        });
        assert!(matches!(bad.optional(), Err(RecordError::InvalidNumber { .. })));
    }
}

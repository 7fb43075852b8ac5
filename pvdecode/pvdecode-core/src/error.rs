//! Error types for the decoder layer.

use std::fmt::{Display, Formatter};

use crate::types::{FieldKind, ScalarType};

/// Error returned by every decode operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// A named or reserved field is absent from the record tree.
    ///
    /// For the value field this usually means the upstream field-selection
    /// mask is empty.
    #[error("no field '{path}' in record")]
    MissingField { path: String },

    /// The field exists but its type cannot be represented in a fixed-width buffer.
    #[error("unsupported type for field '{field}': {reason}")]
    UnsupportedType { field: String, reason: Unsupported },

    /// The destination buffer cannot hold the resolved payload.
    #[error("buffer too small for field '{field}': need {required} bytes, have {capacity}")]
    BufferTooSmall {
        field: String,
        required: usize,
        capacity: usize,
    },

    /// An axis descriptor in the `dimension` structure array is unusable.
    #[error("malformed dimension descriptor at axis {axis}: {detail}")]
    MalformedDimension { axis: usize, detail: String },
}

/// Fieldless discriminant of [`DecodeError`], for callers applying a policy
/// (skip one sample vs. stop the subscription).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    UnsupportedType,
    BufferTooSmall,
    MalformedDimension,
}

impl DecodeError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn unsupported(field: impl Into<String>, reason: Unsupported) -> Self {
        Self::UnsupportedType {
            field: field.into(),
            reason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MissingField { .. } => ErrorKind::MissingField,
            DecodeError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            DecodeError::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            DecodeError::MalformedDimension { .. } => ErrorKind::MalformedDimension,
        }
    }

    /// Replace the field context of errors raised below a named field.
    ///
    /// Node-level operations do not know the name of the node they were
    /// handed; callers that looked the node up by path attach it here.
    pub fn with_field(self, name: &str) -> Self {
        match self {
            DecodeError::UnsupportedType { reason, .. } => DecodeError::UnsupportedType {
                field: name.to_string(),
                reason,
            },
            DecodeError::BufferTooSmall {
                required, capacity, ..
            } => DecodeError::BufferTooSmall {
                field: name.to_string(),
                required,
                capacity,
            },
            other => other,
        }
    }
}

/// Why a field's type was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    /// Text payloads have no fixed width.
    TextEncoding { kind: FieldKind },
    /// Structures only appear as intermediate nodes, never as the extracted value.
    LeafKind { actual: FieldKind },
    /// A union must carry exactly one populated alternative.
    UnionSelection { populated: usize },
    /// The selected union alternative is not a scalar or scalar array.
    UnionAlternative { actual: FieldKind },
    /// A numeric scalar was expected (timestamps, dimension sizes).
    NotInteger { actual: ScalarType },
    /// A scalar was expected but the field is a different kind.
    NotScalar { actual: FieldKind },
    /// An integer does not fit the width the consumer reads it as.
    OutOfRange { target: &'static str },
}

impl Display for Unsupported {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsupported::TextEncoding { kind } => {
                write!(f, "{kind} of type 'string' has no fixed-width encoding")
            }
            Unsupported::LeafKind { actual } => {
                write!(f, "expected scalar, scalarArray or union, got {actual}")
            }
            Unsupported::UnionSelection { populated } => {
                write!(f, "expected exactly one populated union field, got {populated}")
            }
            Unsupported::UnionAlternative { actual } => {
                write!(f, "expected union of scalar or scalarArray, got union of {actual}")
            }
            Unsupported::NotInteger { actual } => {
                write!(f, "expected integer scalar, got '{actual}'")
            }
            Unsupported::NotScalar { actual } => write!(f, "expected scalar, got {actual}"),
            Unsupported::OutOfRange { target } => {
                write!(f, "integer value does not fit in {target}")
            }
        }
    }
}

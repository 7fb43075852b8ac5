//! Provider-agnostic core types for `pvdecode`.
//!
//! This crate defines the record-tree capability contract ([`PvNode`]), an
//! owned tree implementing it ([`PvField`]), the scalar type enumerations,
//! the decoded output types and [`DecodeError`].

mod error;
mod node;
mod payload;
mod tree;
mod types;
mod value;

pub use error::{DecodeError, ErrorKind, Unsupported};
pub use node::PvNode;
pub use payload::{DecodedPayload, EPICS_EPOCH_OFFSET, FieldDescriptor, Shape, Timestamp};
pub use tree::{NamedField, PvField, PvStructure, PvUnion};
pub use types::{ElementType, FieldKind, ScalarType};
pub use value::{ArrayView, ScalarArray, ScalarValue};

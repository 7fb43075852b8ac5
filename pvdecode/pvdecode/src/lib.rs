//! Decode EPICS pvData monitor updates into flat native-endian buffers.
//!
//! [`PvDecoder`] resolves the value field of a record tree, copies its
//! elements into a caller-owned buffer, and reports the payload shape from
//! the NTNDArray-style `dimension` field. Record trees are supplied through
//! the [`pvdecode_core::PvNode`] trait.

mod decoder;
mod describe;
mod dimension;
mod extract;
mod leaf;
mod resolve;
mod timestamp;

pub use decoder::{PvDecoder, PvDecoderBuilder};
pub use describe::{FieldDetail, FieldReport, StructureReport, describe};
pub use dimension::{
    DIMENSION_FIELD, SIZE_FIELD, axis_size, axis_sizes, consumer_axis_order, dimensions,
};
pub use extract::{extract, extract_field};
#[cfg(feature = "arrow")]
pub use pvdecode_arrow as arrow;
pub use pvdecode_core as core;
pub use resolve::resolve;
pub use timestamp::{TIMESTAMP_FIELD, timestamp, timestamp_with_offset};

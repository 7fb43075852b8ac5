//! Arrow integration layer for `pvdecode`.
//!
//! Collected [`DecodedUpdate`] rows of one monitored variable are converted
//! into a single Arrow `RecordBatch`:
//! - `@timestamp`: nanosecond `Timestamp` in UTC, converted back from the
//!   EPICS epoch with the offset used at decode time.
//! - `value`: `List<T>` of the element type, one list per update.
//! - `shape`: `List<UInt32>`, slowest-varying axis first.
//!
//! # Typical Flow
//! ```rust
//! use pvdecode_arrow::{DecodedUpdate, updates_to_record_batch};
//! use pvdecode_core::EPICS_EPOCH_OFFSET;
//!
//! # let rows: Vec<DecodedUpdate> = vec![];
//! // rows must not be empty.
//! if !rows.is_empty() {
//!     let _batch = updates_to_record_batch(&rows, EPICS_EPOCH_OFFSET);
//! }
//! ```
pub mod arrow_convert;
pub mod error;
pub mod schema_convert;

pub use arrow_convert::{
    DecodedUpdate, list_offsets, payload_to_array, updates_to_record_batch,
};
pub use error::ArrowConvertError;
pub use schema_convert::{element_type_to_arrow, updates_schema};

pub(crate) const TIMESTAMP_TZ: &str = "+00:00";

use arrow::error::ArrowError;
use pvdecode_core::ElementType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("Cannot create RecordBatch from empty rows")]
    EmptyRows,
    #[error("row {row}: element type {actual} differs from {expected} of the first row")]
    MixedElementTypes {
        row: usize,
        expected: ElementType,
        actual: ElementType,
    },
    #[error("row {row}: payload holds {actual} bytes, expected {expected}")]
    PayloadLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("payload of {len} bytes is not a whole number of {element_type} elements")]
    PayloadWidth { element_type: ElementType, len: usize },
    #[error("batch holds {elements} list entries, more than i32 offsets can address")]
    BatchTooLarge { elements: usize },
    #[error("row {row}: timestamp does not fit in i64 nanoseconds")]
    TimestampOverflow { row: usize },
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

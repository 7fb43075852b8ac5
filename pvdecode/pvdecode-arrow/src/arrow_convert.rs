//! Conversion from decoded update rows to Arrow `RecordBatch`.

use std::sync::Arc;

use arrow::{
    array::{
        ArrayRef, BooleanArray, Float32Array, Float64Array, Int8Array, Int16Array, Int32Array,
        Int64Array, ListArray, TimestampNanosecondArray, UInt8Array, UInt16Array, UInt32Array,
        UInt64Array,
    },
    buffer::OffsetBuffer,
    datatypes::DataType,
    record_batch::RecordBatch,
};
use pvdecode_core::{DecodedPayload, ElementType, Timestamp};

use crate::{
    error::ArrowConvertError,
    schema_convert::{element_type_to_arrow, item_field, updates_schema},
};

/// One decoded update together with the bytes it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedUpdate {
    /// Timestamp relative to the epoch offset passed to
    /// [`updates_to_record_batch`].
    pub timestamp: Timestamp,
    pub payload: DecodedPayload,
    /// Native-endian elements, `payload.element_count` of them.
    pub bytes: Vec<u8>,
}

/// Convert rows to a RecordBatch with `@timestamp`, `value` and `shape`
/// columns.
///
/// All rows must share the element type of the first row.
pub fn updates_to_record_batch(
    rows: &[DecodedUpdate],
    epoch_offset: i64,
) -> Result<RecordBatch, ArrowConvertError> {
    let Some(first) = rows.first() else {
        return Err(ArrowConvertError::EmptyRows);
    };
    let element_type = first.payload.element_type;
    let value_offsets = list_offsets(rows.iter().map(|r| r.payload.element_count))?;
    let shape_offsets = list_offsets(rows.iter().map(|r| r.payload.shape.rank()))?;

    let mut timestamps = Vec::with_capacity(rows.len());
    let mut value_bytes = Vec::new();
    let mut shape_axes = Vec::new();
    for (row, update) in rows.iter().enumerate() {
        let actual = update.payload.element_type;
        if actual != element_type {
            return Err(ArrowConvertError::MixedElementTypes {
                row,
                expected: element_type,
                actual,
            });
        }
        let expected = update.payload.element_count * element_type.width();
        if update.bytes.len() != expected {
            return Err(ArrowConvertError::PayloadLength {
                row,
                expected,
                actual: update.bytes.len(),
            });
        }
        let nanos = update
            .timestamp
            .unix_nanos(epoch_offset)
            .ok_or(ArrowConvertError::TimestampOverflow { row })?;
        timestamps.push(nanos);
        value_bytes.extend_from_slice(&update.bytes);
        shape_axes.extend_from_slice(update.payload.shape.as_slice());
    }

    let timestamp_column =
        TimestampNanosecondArray::from(timestamps).with_timezone(crate::TIMESTAMP_TZ);
    let value_column = ListArray::try_new(
        item_field(element_type_to_arrow(element_type)),
        value_offsets,
        payload_to_array(element_type, &value_bytes)?,
        None,
    )?;
    let shape_column = ListArray::try_new(
        item_field(DataType::UInt32),
        shape_offsets,
        Arc::new(UInt32Array::from(shape_axes)),
        None,
    )?;

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(timestamp_column),
        Arc::new(value_column),
        Arc::new(shape_column),
    ];
    Ok(RecordBatch::try_new(
        Arc::new(updates_schema(element_type)),
        arrays,
    )?)
}

/// Offsets of a `List` column with the given per-row lengths.
///
/// Fails when the total does not fit the column's `i32` offsets.
pub fn list_offsets(
    lengths: impl Iterator<Item = usize> + Clone,
) -> Result<OffsetBuffer<i32>, ArrowConvertError> {
    let total = lengths
        .clone()
        .try_fold(0_usize, |acc, len| acc.checked_add(len))
        .filter(|&total| i32::try_from(total).is_ok());
    match total {
        Some(_) => Ok(OffsetBuffer::from_lengths(lengths)),
        None => Err(ArrowConvertError::BatchTooLarge {
            elements: lengths.fold(0_usize, usize::saturating_add),
        }),
    }
}

/// Reinterpret a native-endian decoded buffer as an Arrow array.
///
/// Booleans are one byte each; any non-zero byte is `true`.
pub fn payload_to_array(
    element_type: ElementType,
    bytes: &[u8],
) -> Result<ArrayRef, ArrowConvertError> {
    let width = element_type.width();
    if bytes.len() % width != 0 {
        return Err(ArrowConvertError::PayloadWidth {
            element_type,
            len: bytes.len(),
        });
    }

    macro_rules! primitive {
        ($array:ty, $native:ty) => {{
            let (chunks, _) = bytes.as_chunks::<{ size_of::<$native>() }>();
            Arc::new(<$array>::from_iter_values(
                chunks.iter().map(|c| <$native>::from_ne_bytes(*c)),
            )) as ArrayRef
        }};
    }

    let array = match element_type {
        ElementType::Bool => {
            let values: Vec<bool> = bytes.iter().map(|&b| b != 0).collect();
            Arc::new(BooleanArray::from(values)) as ArrayRef
        }
        ElementType::I8 => primitive!(Int8Array, i8),
        ElementType::I16 => primitive!(Int16Array, i16),
        ElementType::I32 => primitive!(Int32Array, i32),
        ElementType::I64 => primitive!(Int64Array, i64),
        ElementType::U8 => primitive!(UInt8Array, u8),
        ElementType::U16 => primitive!(UInt16Array, u16),
        ElementType::U32 => primitive!(UInt32Array, u32),
        ElementType::U64 => primitive!(UInt64Array, u64),
        ElementType::F32 => primitive!(Float32Array, f32),
        ElementType::F64 => primitive!(Float64Array, f64),
    };
    Ok(array)
}

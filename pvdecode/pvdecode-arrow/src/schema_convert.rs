use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema, TimeUnit};
use pvdecode_core::ElementType;

pub const TIMESTAMP_COLUMN: &str = "@timestamp";
pub const VALUE_COLUMN: &str = "value";
pub const SHAPE_COLUMN: &str = "shape";

/// Arrow type of one decoded element.
pub fn element_type_to_arrow(element_type: ElementType) -> DataType {
    match element_type {
        ElementType::Bool => DataType::Boolean,
        ElementType::I8 => DataType::Int8,
        ElementType::I16 => DataType::Int16,
        ElementType::I32 => DataType::Int32,
        ElementType::I64 => DataType::Int64,
        ElementType::U8 => DataType::UInt8,
        ElementType::U16 => DataType::UInt16,
        ElementType::U32 => DataType::UInt32,
        ElementType::U64 => DataType::UInt64,
        ElementType::F32 => DataType::Float32,
        ElementType::F64 => DataType::Float64,
    }
}

/// Schema of the batch built by
/// [`updates_to_record_batch`](crate::updates_to_record_batch).
pub fn updates_schema(element_type: ElementType) -> Schema {
    Schema::new(vec![
        Field::new(
            TIMESTAMP_COLUMN,
            DataType::Timestamp(TimeUnit::Nanosecond, Some(Arc::from(crate::TIMESTAMP_TZ))),
            false,
        ),
        Field::new(
            VALUE_COLUMN,
            DataType::List(item_field(element_type_to_arrow(element_type))),
            false,
        ),
        Field::new(
            SHAPE_COLUMN,
            DataType::List(item_field(DataType::UInt32)),
            false,
        ),
    ])
}

pub(crate) fn item_field(data_type: DataType) -> FieldRef {
    Arc::new(Field::new("item", data_type, false))
}

//! Typed scalar payloads carried by record-tree leaves.

use std::sync::Arc;

use crate::types::ScalarType;

/// Value held by a scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Arc<str>),
}

impl ScalarValue {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Bool(_) => ScalarType::Bool,
            ScalarValue::I8(_) => ScalarType::I8,
            ScalarValue::I16(_) => ScalarType::I16,
            ScalarValue::I32(_) => ScalarType::I32,
            ScalarValue::I64(_) => ScalarType::I64,
            ScalarValue::U8(_) => ScalarType::U8,
            ScalarValue::U16(_) => ScalarType::U16,
            ScalarValue::U32(_) => ScalarType::U32,
            ScalarValue::U64(_) => ScalarType::U64,
            ScalarValue::F32(_) => ScalarType::F32,
            ScalarValue::F64(_) => ScalarType::F64,
            ScalarValue::String(_) => ScalarType::String,
        }
    }

    /// One-element view of this value, so scalars and arrays share a dispatch path.
    pub fn as_view(&self) -> ArrayView<'_> {
        use std::slice::from_ref;

        match self {
            ScalarValue::Bool(v) => ArrayView::Bool(from_ref(v)),
            ScalarValue::I8(v) => ArrayView::I8(from_ref(v)),
            ScalarValue::I16(v) => ArrayView::I16(from_ref(v)),
            ScalarValue::I32(v) => ArrayView::I32(from_ref(v)),
            ScalarValue::I64(v) => ArrayView::I64(from_ref(v)),
            ScalarValue::U8(v) => ArrayView::U8(from_ref(v)),
            ScalarValue::U16(v) => ArrayView::U16(from_ref(v)),
            ScalarValue::U32(v) => ArrayView::U32(from_ref(v)),
            ScalarValue::U64(v) => ArrayView::U64(from_ref(v)),
            ScalarValue::F32(v) => ArrayView::F32(from_ref(v)),
            ScalarValue::F64(v) => ArrayView::F64(from_ref(v)),
            ScalarValue::String(v) => ArrayView::String(from_ref(v)),
        }
    }

    /// Integer value widened to `i64`.
    ///
    /// Returns `None` for non-integer encodings and for `u64` values above
    /// `i64::MAX`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::I8(v) => Some(i64::from(*v)),
            ScalarValue::I16(v) => Some(i64::from(*v)),
            ScalarValue::I32(v) => Some(i64::from(*v)),
            ScalarValue::I64(v) => Some(*v),
            ScalarValue::U8(v) => Some(i64::from(*v)),
            ScalarValue::U16(v) => Some(i64::from(*v)),
            ScalarValue::U32(v) => Some(i64::from(*v)),
            ScalarValue::U64(v) => i64::try_from(*v).ok(),
            ScalarValue::Bool(_)
            | ScalarValue::F32(_)
            | ScalarValue::F64(_)
            | ScalarValue::String(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarValue::I8(_)
                | ScalarValue::I16(_)
                | ScalarValue::I32(_)
                | ScalarValue::I64(_)
                | ScalarValue::U8(_)
                | ScalarValue::U16(_)
                | ScalarValue::U32(_)
                | ScalarValue::U64(_)
        )
    }
}

/// Values held by a scalar-array leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArray {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    String(Vec<Arc<str>>),
}

impl ScalarArray {
    pub fn strings<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Self {
        Self::String(items.into_iter().map(|s| Arc::from(s.as_ref())).collect())
    }

    pub fn view(&self) -> ArrayView<'_> {
        match self {
            ScalarArray::Bool(v) => ArrayView::Bool(v),
            ScalarArray::I8(v) => ArrayView::I8(v),
            ScalarArray::I16(v) => ArrayView::I16(v),
            ScalarArray::I32(v) => ArrayView::I32(v),
            ScalarArray::I64(v) => ArrayView::I64(v),
            ScalarArray::U8(v) => ArrayView::U8(v),
            ScalarArray::U16(v) => ArrayView::U16(v),
            ScalarArray::U32(v) => ArrayView::U32(v),
            ScalarArray::U64(v) => ArrayView::U64(v),
            ScalarArray::F32(v) => ArrayView::F32(v),
            ScalarArray::F64(v) => ArrayView::F64(v),
            ScalarArray::String(v) => ArrayView::String(v),
        }
    }

    pub fn element_scalar_type(&self) -> ScalarType {
        self.view().scalar_type()
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed, typed view of leaf payload values.
///
/// This is the read-only payload accessor the decoder consumes; providers
/// with their own storage hand out views over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayView<'a> {
    Bool(&'a [bool]),
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    U64(&'a [u64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
    String(&'a [Arc<str>]),
}

impl ArrayView<'_> {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ArrayView::Bool(_) => ScalarType::Bool,
            ArrayView::I8(_) => ScalarType::I8,
            ArrayView::I16(_) => ScalarType::I16,
            ArrayView::I32(_) => ScalarType::I32,
            ArrayView::I64(_) => ScalarType::I64,
            ArrayView::U8(_) => ScalarType::U8,
            ArrayView::U16(_) => ScalarType::U16,
            ArrayView::U32(_) => ScalarType::U32,
            ArrayView::U64(_) => ScalarType::U64,
            ArrayView::F32(_) => ScalarType::F32,
            ArrayView::F64(_) => ScalarType::F64,
            ArrayView::String(_) => ScalarType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayView::Bool(v) => v.len(),
            ArrayView::I8(v) => v.len(),
            ArrayView::I16(v) => v.len(),
            ArrayView::I32(v) => v.len(),
            ArrayView::I64(v) => v.len(),
            ArrayView::U8(v) => v.len(),
            ArrayView::U16(v) => v.len(),
            ArrayView::U32(v) => v.len(),
            ArrayView::U64(v) => v.len(),
            ArrayView::F32(v) => v.len(),
            ArrayView::F64(v) => v.len(),
            ArrayView::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_from_native {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for ScalarValue {
                fn from(v: $t) -> Self {
                    ScalarValue::$variant(v)
                }
            }

            impl From<Vec<$t>> for ScalarArray {
                fn from(v: Vec<$t>) -> Self {
                    ScalarArray::$variant(v)
                }
            }
        )*
    };
}

impl_from_native!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

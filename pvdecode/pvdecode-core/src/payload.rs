//! Decoded output types shared by the decoder and the Arrow bridge.

use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use crate::types::{ElementType, FieldKind};

/// Seconds between the UNIX epoch (1970-01-01) and the EPICS epoch (1990-01-01).
pub const EPICS_EPOCH_OFFSET: i64 = 631_152_000;

/// Resolved layout of a decodable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Kind of the named field itself (a union stays `Union`).
    pub kind: FieldKind,
    pub element_type: ElementType,
    pub element_count: usize,
    /// 0 for scalars, otherwise the number of `dimension` axes (default 1).
    pub rank: usize,
}

impl FieldDescriptor {
    /// Bytes needed to hold the decoded payload.
    pub fn byte_len(&self) -> usize {
        self.element_count * self.element_type.width()
    }
}

/// Per-axis sizes, slowest-varying axis first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape(pub Vec<u32>);

impl Shape {
    pub fn new(axes: Vec<u32>) -> Self {
        Self(axes)
    }

    /// Shape of a scalar value: no axes.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Product of all axes; 1 for a scalar.
    pub fn element_count(&self) -> u64 {
        self.0.iter().map(|&n| u64::from(n)).product()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Shape {
    fn from(value: Vec<u32>) -> Self {
        Self(value)
    }
}

impl Deref for Shape {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("[")?;
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}")?;
        }
        f.write_str("]")
    }
}

/// Result of decoding the value field of one update into a caller buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub element_type: ElementType,
    pub element_count: usize,
    pub shape: Shape,
    pub bytes_written: usize,
}

impl DecodedPayload {
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }
}

/// Update timestamp relative to the EPICS epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanoseconds: i32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Nanoseconds since the UNIX epoch, given the offset used to produce
    /// this timestamp. `None` on overflow.
    pub fn unix_nanos(&self, epoch_offset: i64) -> Option<i64> {
        self.seconds
            .checked_add(epoch_offset)?
            .checked_mul(1_000_000_000)?
            .checked_add(i64::from(self.nanoseconds))
    }
}

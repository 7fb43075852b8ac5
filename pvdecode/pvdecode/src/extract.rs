//! Copy leaf payloads into caller-owned byte buffers.

use pvdecode_core::{ArrayView, DecodeError, FieldKind, PvNode, Unsupported};

use crate::leaf::leaf_payload;

/// Fixed-width element as written into a decoded buffer (native byte order).
trait Element: Copy {
    const WIDTH: usize;

    fn write_ne(self, out: &mut [u8]);
}

impl Element for bool {
    const WIDTH: usize = 1;

    fn write_ne(self, out: &mut [u8]) {
        out.copy_from_slice(&[u8::from(self)]);
    }
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const WIDTH: usize = size_of::<$t>();

                fn write_ne(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_element!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Write the value of a scalar, scalar-array or single-alternative union
/// node into `dest` and return the number of bytes written.
///
/// Nothing is written when the node is unsupported or `dest` is too small.
pub fn extract<N: PvNode>(node: &N, dest: &mut [u8]) -> Result<usize, DecodeError> {
    let payload = leaf_payload(node)?;
    write_elements(payload.view(), payload.kind(), dest)
}

/// [`extract`] on the node at a simple or dotted `field` path of `tree`.
pub fn extract_field<N: PvNode>(
    tree: &N,
    field: &str,
    dest: &mut [u8],
) -> Result<usize, DecodeError> {
    let node = tree
        .sub_field(field)
        .ok_or_else(|| DecodeError::missing(field))?;
    extract(node, dest).map_err(|e| e.with_field(field))
}

// Every element encoding is dispatched here and only here.
fn write_elements(
    view: ArrayView<'_>,
    kind: FieldKind,
    dest: &mut [u8],
) -> Result<usize, DecodeError> {
    match view {
        ArrayView::Bool(values) => copy_into(values, dest),
        ArrayView::I8(values) => copy_into(values, dest),
        ArrayView::I16(values) => copy_into(values, dest),
        ArrayView::I32(values) => copy_into(values, dest),
        ArrayView::I64(values) => copy_into(values, dest),
        ArrayView::U8(values) => copy_into(values, dest),
        ArrayView::U16(values) => copy_into(values, dest),
        ArrayView::U32(values) => copy_into(values, dest),
        ArrayView::U64(values) => copy_into(values, dest),
        ArrayView::F32(values) => copy_into(values, dest),
        ArrayView::F64(values) => copy_into(values, dest),
        ArrayView::String(_) => Err(DecodeError::unsupported(
            "",
            Unsupported::TextEncoding { kind },
        )),
    }
}

fn copy_into<T: Element>(values: &[T], dest: &mut [u8]) -> Result<usize, DecodeError> {
    let required = values.len() * T::WIDTH;
    if dest.len() < required {
        return Err(DecodeError::BufferTooSmall {
            field: String::new(),
            required,
            capacity: dest.len(),
        });
    }
    for (value, out) in values.iter().zip(dest.chunks_exact_mut(T::WIDTH)) {
        value.write_ne(out);
    }
    Ok(required)
}

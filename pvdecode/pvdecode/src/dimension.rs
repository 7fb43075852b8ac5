//! Shape resolution from the NTNDArray-style `dimension` structure array.

use pvdecode_core::{DecodeError, FieldKind, PvNode, Shape};

use crate::leaf::integer_value;

/// Name of the per-axis descriptor array.
pub const DIMENSION_FIELD: &str = "dimension";
/// Name of the axis length inside each descriptor.
pub const SIZE_FIELD: &str = "size";

/// Shape of the payload described by `tree`.
///
/// With a `dimension` field, axis sizes are read and converted to consumer
/// order with [`consumer_axis_order`]. Without one the payload is treated as
/// one-dimensional: `[element_count]`.
pub fn dimensions<N: PvNode>(tree: &N, element_count: usize) -> Result<Shape, DecodeError> {
    match tree.child(DIMENSION_FIELD) {
        Some(dimension) => Ok(consumer_axis_order(axis_sizes(dimension)?)),
        None => {
            let count = u32::try_from(element_count).map_err(|_| {
                DecodeError::MalformedDimension {
                    axis: 0,
                    detail: format!("element count {element_count} does not fit in u32"),
                }
            })?;
            Ok(Shape::new(vec![count]))
        }
    }
}

/// Reorder axis sizes from source order to consumer order.
///
/// Descriptors list axes as `[x, y, ...]`, x varying fastest. Consumers
/// index row-major and expect `[..., y, x]`.
pub fn consumer_axis_order(source_axes: Vec<u32>) -> Shape {
    let mut axes = source_axes;
    axes.reverse();
    Shape::new(axes)
}

/// Axis sizes in source order, one per descriptor.
pub fn axis_sizes<N: PvNode>(dimension: &N) -> Result<Vec<u32>, DecodeError> {
    expect_structure_array(dimension)?;
    dimension
        .elements()
        .into_iter()
        .enumerate()
        .map(|(axis, descriptor)| axis_size(axis, descriptor))
        .collect()
}

/// Length of one axis descriptor.
pub fn axis_size<N: PvNode>(axis: usize, descriptor: &N) -> Result<u32, DecodeError> {
    let size = descriptor
        .child(SIZE_FIELD)
        .ok_or_else(|| DecodeError::MalformedDimension {
            axis,
            detail: format!("missing '{SIZE_FIELD}' field"),
        })?;
    integer_value(size).map_err(|reason| DecodeError::MalformedDimension {
        axis,
        detail: format!("'{SIZE_FIELD}': {reason}"),
    })
}

/// Number of axes declared by the `dimension` field of `tree`, if any.
pub(crate) fn declared_rank<N: PvNode>(tree: &N) -> Result<Option<usize>, DecodeError> {
    match tree.child(DIMENSION_FIELD) {
        Some(dimension) => {
            expect_structure_array(dimension)?;
            Ok(Some(dimension.elements().len()))
        }
        None => Ok(None),
    }
}

fn expect_structure_array<N: PvNode>(dimension: &N) -> Result<(), DecodeError> {
    match dimension.kind() {
        FieldKind::StructureArray => Ok(()),
        actual => Err(DecodeError::MalformedDimension {
            axis: 0,
            detail: format!("'{DIMENSION_FIELD}' is a {actual}, expected structureArray"),
        }),
    }
}

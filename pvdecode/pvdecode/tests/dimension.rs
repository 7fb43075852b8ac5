use pvdecode::{axis_sizes, consumer_axis_order, dimensions};
use pvdecode_core::{DecodeError, PvField, PvNode, PvStructure, Shape};

fn axis(size: impl Into<pvdecode_core::ScalarValue>) -> PvStructure {
    PvStructure::new().field("size", PvField::scalar(size))
}

fn with_dimension(axes: impl IntoIterator<Item = PvStructure>) -> PvField {
    PvStructure::new()
        .field("value", PvField::array(vec![0_u8; 4]))
        .field("dimension", PvField::structure_array(axes))
        .into()
}

#[test]
fn axes_are_reported_slowest_first() {
    let tree = with_dimension([axis(5_i32), axis(3_i32), axis(2_i32)]);
    assert_eq!(dimensions(&tree, 30).unwrap(), Shape::new(vec![2, 3, 5]));
}

#[test]
fn consumer_axis_order_reverses() {
    assert_eq!(consumer_axis_order(vec![7, 8, 9]).as_slice(), &[9, 8, 7]);
    assert_eq!(consumer_axis_order(vec![4]).as_slice(), &[4]);
    assert_eq!(consumer_axis_order(Vec::new()).rank(), 0);
}

#[test]
fn absent_dimension_is_one_axis_of_element_count() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![0_i64; 7]))
        .into();
    assert_eq!(dimensions(&tree, 7).unwrap(), Shape::new(vec![7]));
}

#[test]
fn empty_dimension_is_rank_zero() {
    let tree = with_dimension(Vec::<PvStructure>::new());
    assert_eq!(dimensions(&tree, 4).unwrap().rank(), 0);
}

#[test]
fn size_accepts_any_integer_type_in_range() {
    let tree = with_dimension([axis(2_u8), axis(3_i64), axis(4_u32)]);
    assert_eq!(dimensions(&tree, 24).unwrap().as_slice(), &[4, 3, 2]);
}

#[test]
fn missing_size_is_malformed_at_its_axis() {
    let tree = with_dimension([
        axis(2_i32),
        PvStructure::new().field("offset", PvField::scalar(0_i32)),
    ]);
    assert!(matches!(
        dimensions(&tree, 4).unwrap_err(),
        DecodeError::MalformedDimension { axis: 1, .. }
    ));
}

#[test]
fn non_integer_or_negative_size_is_malformed() {
    let float = with_dimension([axis(2.0_f64)]);
    assert!(matches!(
        dimensions(&float, 2).unwrap_err(),
        DecodeError::MalformedDimension { axis: 0, .. }
    ));

    let negative = with_dimension([axis(4_i32), axis(-1_i32)]);
    assert!(matches!(
        dimensions(&negative, 4).unwrap_err(),
        DecodeError::MalformedDimension { axis: 1, .. }
    ));
}

#[test]
fn axis_sizes_keep_source_order() {
    let tree = with_dimension([axis(640_i32), axis(480_i32)]);
    let dimension = tree.child("dimension").unwrap();
    assert_eq!(axis_sizes(dimension).unwrap(), vec![640, 480]);
}

use pvdecode::resolve;
use pvdecode_core::{
    DecodeError, ElementType, ErrorKind, FieldDescriptor, FieldKind, PvField, PvStructure,
    PvUnion, ScalarArray, ScalarValue, Unsupported,
};

fn axis(size: i32) -> PvStructure {
    PvStructure::new()
        .with_id("dimension_t")
        .field("size", PvField::scalar(size))
        .field("offset", PvField::scalar(0_i32))
        .field("fullSize", PvField::scalar(size))
        .field("binning", PvField::scalar(1_i32))
        .field("reverse", PvField::scalar(false))
}

#[test]
fn scalar_has_rank_zero() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::scalar(3.5_f64))
        .into();
    assert_eq!(
        resolve(&tree, "value").unwrap(),
        FieldDescriptor {
            kind: FieldKind::Scalar,
            element_type: ElementType::F64,
            element_count: 1,
            rank: 0,
        }
    );
}

#[test]
fn array_without_dimension_has_rank_one() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![1_u8, 2, 3, 4, 5]))
        .into();
    let descriptor = resolve(&tree, "value").unwrap();
    assert_eq!(descriptor.element_type, ElementType::U8);
    assert_eq!(descriptor.element_count, 5);
    assert_eq!(descriptor.rank, 1);
    assert_eq!(descriptor.byte_len(), 5);
}

#[test]
fn array_rank_follows_dimension_length() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![0_i16; 24]))
        .field(
            "dimension",
            PvField::structure_array([axis(4), axis(3), axis(2)]),
        )
        .into();
    let descriptor = resolve(&tree, "value").unwrap();
    assert_eq!(descriptor.rank, 3);
    assert_eq!(descriptor.element_count, 24);
    assert_eq!(descriptor.byte_len(), 48);
}

#[test]
fn union_keeps_its_kind_and_resolves_the_alternative() {
    let tree: PvField = PvStructure::new()
        .field(
            "value",
            PvUnion::select("intValue", PvField::array(vec![1_i32, 2])),
        )
        .into();
    let descriptor = resolve(&tree, "value").unwrap();
    assert_eq!(descriptor.kind, FieldKind::Union);
    assert_eq!(descriptor.element_type, ElementType::I32);
    assert_eq!(descriptor.element_count, 2);
    assert_eq!(descriptor.rank, 1);
}

#[test]
fn dotted_path_reads_dimension_beside_the_field() {
    let tree: PvField = PvStructure::new()
        .field(
            "image",
            PvStructure::new()
                .field("data", PvField::array(vec![0.0_f32; 6]))
                .field("dimension", PvField::structure_array([axis(3), axis(2)])),
        )
        .field("dimension", PvField::structure_array([axis(6)]))
        .into();
    assert_eq!(resolve(&tree, "image.data").unwrap().rank, 2);
}

#[test]
fn text_fields_are_refused() {
    let tree: PvField = PvStructure::new()
        .field("name", PvField::scalar(ScalarValue::string("pump")))
        .field("labels", PvField::array(ScalarArray::strings(["a"])))
        .into();

    assert_eq!(
        resolve(&tree, "name").unwrap_err(),
        DecodeError::unsupported(
            "name",
            Unsupported::TextEncoding {
                kind: FieldKind::Scalar
            }
        )
    );
    assert_eq!(
        resolve(&tree, "labels").unwrap_err(),
        DecodeError::unsupported(
            "labels",
            Unsupported::TextEncoding {
                kind: FieldKind::ScalarArray
            }
        )
    );
}

#[test]
fn missing_field_is_reported_with_path() {
    let tree: PvField = PvStructure::new().into();
    let err = resolve(&tree, "value").unwrap_err();
    assert_eq!(err, DecodeError::missing("value"));
    assert_eq!(err.kind(), ErrorKind::MissingField);
}

#[test]
fn dimension_of_wrong_kind_is_malformed() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![1_i32, 2]))
        .field("dimension", PvField::array(vec![2_i32]))
        .into();
    let err = resolve(&tree, "value").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDimension);
}

#[test]
fn union_of_int32_resolves_like_plain_int32() {
    let plain: PvField = PvStructure::new()
        .field("value", PvField::scalar(5_i32))
        .into();
    let union: PvField = PvStructure::new()
        .field("value", PvUnion::select("intValue", PvField::scalar(5_i32)))
        .into();

    let expected = resolve(&plain, "value").unwrap();
    let actual = resolve(&union, "value").unwrap();
    assert_eq!(actual.kind, FieldKind::Union);
    assert_eq!(
        FieldDescriptor {
            kind: FieldKind::Scalar,
            ..actual
        },
        expected
    );
    assert_eq!(
        (actual.element_type, actual.element_count, actual.rank),
        (ElementType::I32, 1, 0)
    );
}

#[test]
fn union_without_exactly_one_alternative_does_not_resolve() {
    let empty = PvUnion::new();
    let two = PvUnion::select("intValue", PvField::scalar(1_i32))
        .with("doubleValue", PvField::scalar(2.0_f64));

    for (union, populated) in [(empty, 0), (two, 2)] {
        let tree: PvField = PvStructure::new().field("value", union).into();
        assert_eq!(
            resolve(&tree, "value").unwrap_err(),
            DecodeError::unsupported("value", Unsupported::UnionSelection { populated })
        );
    }
}

use pvdecode_core::{ElementType, FieldKind, ScalarType};

#[test]
fn every_element_type_maps_back_to_its_scalar_type() {
    for element_type in ElementType::ALL {
        let scalar_type = element_type.scalar_type();
        assert_eq!(scalar_type.element_type(), Some(element_type));
        assert_eq!(ElementType::try_from(scalar_type), Ok(element_type));
    }
}

#[test]
fn string_scalar_type_has_no_element_type() {
    assert_eq!(ScalarType::String.element_type(), None);
    assert_eq!(
        ElementType::try_from(ScalarType::String),
        Err(ScalarType::String)
    );
}

#[test]
fn element_widths_are_canonical() {
    let widths: Vec<usize> = ElementType::ALL.iter().map(|t| t.width()).collect();
    assert_eq!(widths, vec![1, 1, 2, 4, 8, 1, 2, 4, 8, 4, 8]);
}

#[test]
fn type_names_follow_pvdata() {
    assert_eq!(ScalarType::I32.to_string(), "int");
    assert_eq!(ScalarType::U8.to_string(), "ubyte");
    assert_eq!(ElementType::F64.to_string(), "double");
    assert_eq!(FieldKind::StructureArray.to_string(), "structureArray");
}

#[test]
fn only_scalar_kinds_are_leaves() {
    assert!(FieldKind::Scalar.is_leaf());
    assert!(FieldKind::ScalarArray.is_leaf());
    assert!(!FieldKind::Union.is_leaf());
    assert!(!FieldKind::Structure.is_leaf());
    assert!(!FieldKind::StructureArray.is_leaf());
}

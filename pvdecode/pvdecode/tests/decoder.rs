use pvdecode::PvDecoder;
use pvdecode_core::{
    DecodeError, EPICS_EPOCH_OFFSET, ElementType, ErrorKind, PvField, PvStructure, PvUnion,
    ScalarValue, Shape, Timestamp,
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

fn time_stamp(seconds: i64, nanoseconds: i32) -> PvStructure {
    PvStructure::new()
        .with_id("time_t")
        .field("secondsPastEpoch", PvField::scalar(seconds))
        .field("nanoseconds", PvField::scalar(nanoseconds))
        .field("userTag", PvField::scalar(0_i32))
}

fn nd_array(values: Vec<f32>, axes: &[i32]) -> PvField {
    PvStructure::new()
        .with_id("epics:nt/NTNDArray:1.0")
        .field("value", PvUnion::select("floatValue", PvField::array(values)))
        .field(
            "codec",
            PvStructure::new().field("name", PvField::scalar(ScalarValue::string(""))),
        )
        .field(
            "dimension",
            PvField::structure_array(axes.iter().map(|&n| axis(n))),
        )
        .field("timeStamp", time_stamp(1_700_000_000, 250))
        .into()
}

#[test]
fn defaults_match_nt_conventions() {
    let decoder = PvDecoder::default();
    assert_eq!(decoder.value_field(), "value");
    assert_eq!(decoder.epoch_offset(), EPICS_EPOCH_OFFSET);
}

#[test]
fn decodes_two_dimensional_float_image() {
    let tree = nd_array(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let decoder = PvDecoder::new();

    assert_eq!(decoder.required_len(&tree).unwrap(), 16);
    let mut buf = [0_u8; 16];
    let payload = decoder.decode(&tree, &mut buf).unwrap();

    assert_eq!(payload.element_type, ElementType::F32);
    assert_eq!(payload.element_count, 4);
    assert_eq!(payload.bytes_written, 16);
    assert_eq!(payload.shape, Shape::new(vec![2, 2]));
    for (i, chunk) in buf.chunks_exact(4).enumerate() {
        assert_eq!(chunk, (i as f32 + 1.0).to_ne_bytes());
    }
}

#[test]
fn decodes_plain_float_array_with_square_dimension() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![1.0_f32, 2.0, 3.0, 4.0]))
        .field(
            "dimension",
            PvField::structure_array([
                PvStructure::new().field("size", PvField::scalar(2_i32)),
                PvStructure::new().field("size", PvField::scalar(2_i32)),
            ]),
        )
        .into();

    let mut buf = [0_u8; 16];
    let payload = PvDecoder::new().decode(&tree, &mut buf).unwrap();

    assert_eq!(payload.bytes_written, 16);
    assert_eq!(payload.element_type, ElementType::F32);
    assert_eq!(payload.shape.as_slice(), &[2, 2]);
    let expected: Vec<u8> = [1.0_f32, 2.0, 3.0, 4.0]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    assert_eq!(buf.as_slice(), expected.as_slice());
}

#[test]
fn shape_is_reported_in_consumer_order() {
    let tree = nd_array(vec![0.0; 6], &[3, 2]);
    let (bytes, payload) = PvDecoder::new().decode_to_vec(&tree).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(payload.shape.as_slice(), &[2, 3]);
    assert_eq!(payload.rank(), 2);
}

#[test]
fn scalar_has_empty_shape() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::scalar(42_u32))
        .field("timeStamp", time_stamp(0, 0))
        .into();
    let (bytes, payload) = PvDecoder::new().decode_to_vec(&tree).unwrap();

    assert_eq!(bytes, 42_u32.to_ne_bytes());
    assert_eq!(payload.element_count, 1);
    assert_eq!(payload.shape, Shape::scalar());
    assert_eq!(payload.rank(), 0);
}

#[test]
fn array_without_dimension_is_one_dimensional() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![1_i64, 2, 3, 4, 5, 6, 7]))
        .into();
    let (_, payload) = PvDecoder::new().decode_to_vec(&tree).unwrap();
    assert_eq!(payload.shape.as_slice(), &[7]);
}

#[test]
fn value_field_is_configurable() {
    let tree: PvField = PvStructure::new()
        .field(
            "image",
            PvStructure::new()
                .field("data", PvField::array(vec![7_u16; 12]))
                .field("dimension", PvField::structure_array([axis(4), axis(3)])),
        )
        .into();
    let decoder = PvDecoder::builder().value_field("image.data").build();

    let params = decoder.params(&tree).unwrap();
    assert_eq!(params.element_type, ElementType::U16);
    assert_eq!(params.rank, 2);

    let (bytes, payload) = decoder.decode_to_vec(&tree).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(payload.shape.as_slice(), &[3, 4]);
}

#[test]
fn short_buffer_leaves_destination_untouched() {
    let tree = nd_array(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let mut buf = [0x5A_u8; 12];
    let err = PvDecoder::new().decode(&tree, &mut buf).unwrap_err();

    assert_eq!(
        err,
        DecodeError::BufferTooSmall {
            field: "value".to_string(),
            required: 16,
            capacity: 12,
        }
    );
    assert_eq!(buf, [0x5A; 12]);
}

#[test]
fn malformed_dimension_leaves_destination_untouched() {
    let tree: PvField = PvStructure::new()
        .field("value", PvField::array(vec![1_i8, 2]))
        .field(
            "dimension",
            PvField::structure_array([
                PvStructure::new().field("fullSize", PvField::scalar(2_i32))
            ]),
        )
        .into();
    let mut buf = [0_u8; 2];
    let err = PvDecoder::new().decode(&tree, &mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDimension);
    assert_eq!(buf, [0, 0]);
}

#[test]
fn mismatched_shape_still_decodes() {
    let tree = nd_array(vec![0.0; 5], &[2, 2]);
    let (_, payload) = PvDecoder::new().decode_to_vec(&tree).unwrap();
    assert_eq!(payload.element_count, 5);
    assert_eq!(payload.shape.as_slice(), &[2, 2]);
}

#[test]
fn empty_selection_mask_reports_missing_value() {
    let tree: PvField = PvStructure::new()
        .field("timeStamp", time_stamp(0, 0))
        .into();
    let err = PvDecoder::new().decode_to_vec(&tree).unwrap_err();
    assert_eq!(err, DecodeError::missing("value"));
}

#[test]
fn timestamp_uses_configured_offset() {
    let tree = nd_array(vec![0.0], &[1]);
    assert_eq!(
        PvDecoder::new().timestamp(&tree).unwrap(),
        Timestamp::new(1_700_000_000 - EPICS_EPOCH_OFFSET, 250)
    );
    let unix = PvDecoder::builder().epoch_offset(0).build();
    assert_eq!(
        unix.timestamp(&tree).unwrap(),
        Timestamp::new(1_700_000_000, 250)
    );
}

#[test]
fn describe_is_available_from_decoder() {
    let tree = nd_array(vec![0.0; 4], &[2, 2]);
    let report = PvDecoder::new().describe(&tree);
    assert!(report.is_clean());
    assert_eq!(report.id, "epics:nt/NTNDArray:1.0");
    assert_eq!(
        report.dimension_sizes(),
        Some([Some(2), Some(2)].as_slice())
    );
}

// Hostile and mismatched data/schema pairs must fail cleanly

use microjson::primitives::extract_string;
use microjson::{
    extract, extract_exact, extract_with_config, Cursor, ExtractConfig, ExtractError,
    UnknownTagPolicy, Value,
};
use test_log::test;

/// `levels` arrays nested inside each other, innermost empty.
fn nested_arrays(levels: usize) -> (Vec<u8>, Vec<u8>) {
    let mut data = Vec::new();
    for level in 0..levels {
        let inner = 2 * (levels - level - 1);
        data.extend_from_slice(&(inner as u16).to_be_bytes());
    }
    (data, vec![b'['; levels])
}

#[test]
fn test_empty_inputs() {
    assert_eq!(extract(&[], b""), Err(ExtractError::SchemaExhausted));
    assert_eq!(extract(&[], b"B"), Err(ExtractError::EndOfData));
    assert_eq!(extract(&[], b"n"), Err(ExtractError::EndOfData));
    assert_eq!(extract(&[0x00], b"["), Err(ExtractError::EndOfData));
}

#[test]
fn test_declared_length_beyond_buffer() {
    assert_eq!(extract(&[0xFF, 0xFF, b'a'], b"s"), Err(ExtractError::EndOfData));
    assert_eq!(
        extract(&[0xFF, 0xFF, 0x01, 0x02], b"[BB"),
        Err(ExtractError::SchemaExhausted)
    );
    assert_eq!(
        extract(&[0xFF, 0xFF, 0x00, 0x05, b'a'], b"{B"),
        Err(ExtractError::EndOfData)
    );
}

#[test]
fn test_key_longer_than_budget() {
    // Object budget of 3, but the key alone claims 2 + 4 bytes
    let data = [0x00, 0x03, 0x00, 0x04, b'a', b'b', b'c', b'd', 0x01];
    assert_eq!(extract(&data, b"{B"), Err(ExtractError::MalformedLength));
}

#[test]
fn test_child_overrunning_parent_budget() {
    // Outer array claims 3 bytes, the inner array alone needs 2 + 2
    let data = [0x00, 0x03, 0x00, 0x02, 0x01, 0x02];
    assert_eq!(extract(&data, b"[[BB"), Err(ExtractError::MalformedLength));
}

#[test]
fn test_unknown_tags() {
    assert_eq!(extract(&[0x01], b"Z"), Err(ExtractError::UnknownTag(b'Z')));
    assert_eq!(
        extract(&[0x00, 0x04, 0x00, 0x01, b'k', 0x01], b"{\x00"),
        Err(ExtractError::UnknownTag(0x00))
    );

    let lenient = ExtractConfig::default().with_unknown_tags(UnknownTagPolicy::Ignore);
    assert_eq!(extract_with_config(&[0x01], b"Z", lenient.clone()), Ok(Value::Null));
    assert_eq!(
        extract_with_config(&[0x00, 0x01, 0x01], b"[Z", lenient),
        Err(ExtractError::MalformedLength)
    );
}

#[test]
fn test_depth_cap_stops_deep_nesting() {
    let (data, schema) = nested_arrays(ExtractConfig::DEFAULT_MAX_DEPTH);
    assert!(extract_exact(&data, &schema).is_ok());

    let (data, schema) = nested_arrays(ExtractConfig::DEFAULT_MAX_DEPTH + 1);
    assert_eq!(extract(&data, &schema), Err(ExtractError::MaxDepthReached));

    let (data, schema) = nested_arrays(1000);
    assert_eq!(extract(&data, &schema), Err(ExtractError::MaxDepthReached));
}

#[test]
fn test_zero_depth_allows_scalars_only() {
    let config = ExtractConfig::default().with_max_depth(0);
    assert_eq!(
        extract_with_config(&[0x05], b"B", config.clone()),
        Ok(Value::from(5u8))
    );
    assert_eq!(
        extract_with_config(&[0x00, 0x00], b"[", config),
        Err(ExtractError::MaxDepthReached)
    );
}

#[test]
fn test_trailing_input() {
    assert_eq!(extract_exact(&[0x01, 0x02], b"B"), Err(ExtractError::TrailingInput));
    assert_eq!(extract_exact(&[0x01], b"BB"), Err(ExtractError::TrailingInput));
    assert_eq!(extract(&[0x01, 0x02], b"BB"), Ok(Value::from(1u8)));
}

#[test]
fn test_scratch_buffer_too_small() {
    let data = b"\x00\x05hello";
    let mut cursor = Cursor::new(data);

    let mut small = [0xAAu8; 5];
    assert_eq!(
        extract_string(&mut cursor, &mut small),
        Err(ExtractError::ScratchBufferFull)
    );
    assert_eq!(cursor.position(), 0);

    let mut exact = [0xAAu8; 6];
    assert_eq!(extract_string(&mut cursor, &mut exact), Ok(5));
    assert_eq!(&exact, b"hello\0");
    assert!(cursor.is_empty());
}

#[test]
fn test_every_truncation_of_a_valid_pair_fails() {
    // {"a": [1u8, 2u16], "b": "xy"}
    let data = b"\x00\x0F\x00\x01a\x00\x03\x01\x00\x02\x00\x01b\x00\x02xy";
    let schema = b"{[BHs";
    assert!(extract_exact(data, schema).is_ok());

    for cut in 0..data.len() {
        let result = extract(&data[..cut], schema);
        assert!(result.is_err(), "data cut at {} decoded to {:?}", cut, result);
    }
    for cut in 0..schema.len() {
        let result = extract(data, &schema[..cut]);
        assert!(result.is_err(), "schema cut at {} decoded to {:?}", cut, result);
    }
}

#[test]
fn test_errors_display() {
    assert_eq!(
        ExtractError::MalformedLength.to_string(),
        "malformed length: composite size does not match its contents"
    );
    assert_eq!(
        ExtractError::EndOfData.to_string(),
        "truncated input: read past end of data"
    );
}

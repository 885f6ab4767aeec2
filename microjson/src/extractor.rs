// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use log::{debug, trace};

use crate::config::ExtractConfig;
use crate::cursor::Cursor;
use crate::primitives::*;
use crate::scan;
use crate::tags::Tag;
use crate::value::{Array, JsonString, Number, Object, Value};
use crate::ExtractError;

/// Rebuilds value trees from a data buffer and the schema it was written with.
///
/// The extractor walks the data and schema cursors in lockstep. Arrays and
/// objects are decoded in two passes: a lookahead on copies of the cursors
/// counts the children so the container can be allocated once, then the
/// real cursors walk the same bytes again to decode them.
///
/// # Example
/// ```
/// use microjson::Extractor;
/// // [1u8, 2u8]
/// let mut extractor = Extractor::new(&[0x00, 0x02, 0x01, 0x02], b"[BB");
/// let value = extractor.extract().unwrap();
/// assert_eq!(value.as_array().map(|a| a.len()), Some(2));
/// assert!(extractor.is_finished());
/// ```
#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    data: Cursor<'a>,
    schema: Cursor<'a>,
    config: ExtractConfig,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor with the default configuration.
    pub fn new(data: &'a [u8], schema: &'a [u8]) -> Self {
        Self::with_config(data, schema, ExtractConfig::default())
    }

    /// Creates an extractor with custom limits and policies.
    pub fn with_config(data: &'a [u8], schema: &'a [u8], config: ExtractConfig) -> Self {
        Extractor {
            data: Cursor::new(data),
            schema: Cursor::new(schema),
            config,
        }
    }

    /// Decodes one value tree at the current positions.
    ///
    /// Can be called repeatedly to decode values that were written back to
    /// back. On error neither position moves.
    pub fn extract(&mut self) -> Result<Value, ExtractError> {
        let mut data = self.data;
        let mut schema = self.schema;
        let value = decode_value(&mut data, &mut schema, &self.config, 0)?;
        debug!(
            "Extracted {:?} from {} data bytes and {} schema bytes",
            value.tag(),
            data.position() - self.data.position(),
            schema.position() - self.schema.position()
        );
        self.data = data;
        self.schema = schema;
        Ok(value)
    }

    pub fn data_position(&self) -> usize {
        self.data.position()
    }

    pub fn schema_position(&self) -> usize {
        self.schema.position()
    }

    /// True once both the data and the schema are fully consumed.
    pub fn is_finished(&self) -> bool {
        self.data.is_empty() && self.schema.is_empty()
    }

    /// Fails with `TrailingInput` unless both streams are fully consumed.
    pub fn finish(&self) -> Result<(), ExtractError> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(ExtractError::TrailingInput)
        }
    }
}

/// Decodes the value at the start of `data` described by `schema`.
///
/// Bytes after the value in either slice are ignored.
pub fn extract(data: &[u8], schema: &[u8]) -> Result<Value, ExtractError> {
    Extractor::new(data, schema).extract()
}

/// Like [`extract`], with custom limits and policies.
pub fn extract_with_config(
    data: &[u8],
    schema: &[u8],
    config: ExtractConfig,
) -> Result<Value, ExtractError> {
    Extractor::with_config(data, schema, config).extract()
}

/// Like [`extract`], but leftover bytes in either slice are an error.
pub fn extract_exact(data: &[u8], schema: &[u8]) -> Result<Value, ExtractError> {
    let mut extractor = Extractor::new(data, schema);
    let value = extractor.extract()?;
    extractor.finish()?;
    Ok(value)
}

fn decode_value(
    data: &mut Cursor<'_>,
    schema: &mut Cursor<'_>,
    config: &ExtractConfig,
    depth: usize,
) -> Result<Value, ExtractError> {
    let Some(tag) = scan::next_tag(schema, config)? else {
        return Ok(Value::default());
    };
    trace!("Decoding {:?} at data offset {}", tag, data.position());
    let value = match tag {
        Tag::Null => {
            data.skip(1)?;
            Value::Null
        }
        Tag::Bool => Value::Bool(extract_bool(data)?),
        Tag::Uint8 => Number::U8(extract_uint8(data)?).into(),
        Tag::Int8 => Number::I8(extract_int8(data)?).into(),
        Tag::Uint16 => Number::U16(extract_uint16(data)?).into(),
        Tag::Int16 => Number::I16(extract_int16(data)?).into(),
        Tag::Uint32 => Number::U32(extract_uint32(data)?).into(),
        Tag::Int32 => Number::I32(extract_int32(data)?).into(),
        Tag::Uint64 => Number::U64(extract_uint64(data)?).into(),
        Tag::Int64 => Number::I64(extract_int64(data)?).into(),
        #[cfg(feature = "float")]
        Tag::Float => Number::F32(extract_float(data)?).into(),
        #[cfg(feature = "float")]
        Tag::Double => Number::F64(extract_double(data)?).into(),
        #[cfg(not(feature = "float"))]
        Tag::Float | Tag::Double => return Err(ExtractError::FloatNotAllowed),
        Tag::String => Value::String(decode_string(data)?),
        Tag::Array => {
            let mut lookahead_data = *data;
            let mut lookahead_schema = *schema;
            let count =
                scan::array_len(&mut lookahead_data, &mut lookahead_schema, config, depth)?;
            let mut array = Array::with_capacity(usize::from(count));
            data.skip(2)?;
            for _ in 0..count {
                array.push(decode_value(data, schema, config, depth + 1)?);
            }
            Value::Array(array)
        }
        Tag::Object => {
            let mut lookahead_data = *data;
            let mut lookahead_schema = *schema;
            let count =
                scan::object_len(&mut lookahead_data, &mut lookahead_schema, config, depth)?;
            let mut object = Object::with_capacity(usize::from(count));
            data.skip(2)?;
            for _ in 0..count {
                let key = decode_string(data)?;
                let member = decode_value(data, schema, config, depth + 1)?;
                if let Some(replaced) = object.set(key, member) {
                    trace!("Duplicate key replaced {:?}", replaced.tag());
                }
            }
            Value::Object(object)
        }
    };
    Ok(value)
}

/// Sizes the payload from its length field, then copies it out.
fn decode_string(data: &mut Cursor<'_>) -> Result<JsonString, ExtractError> {
    let len = usize::from(peek_length(data)?);
    let mut bytes = Vec::with_capacity(len);
    bytes.extend_from_slice(extract_str(data)?);
    Ok(bytes.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnknownTagPolicy;
    use test_log::test;

    #[test]
    fn test_scalar_root() {
        assert_eq!(extract(&[0x00, 0x2A], b"H"), Ok(Value::from(42u16)));
        assert_eq!(extract(&[0xFE], b"b"), Ok(Value::from(-2i8)));
        assert_eq!(extract(b"t", b"t"), Ok(Value::Bool(true)));
        assert_eq!(extract(b"f", b"t"), Ok(Value::Bool(false)));
        assert_eq!(extract(&[0x55], b"n"), Ok(Value::Null));
    }

    #[test]
    fn test_nested_tree() {
        // {"a": [1u8, {"b": null}], "s": "hi"}
        let data = b"\x00\x13\
            \x00\x01a\x00\x07\x01\x00\x04\x00\x01b\x00\
            \x00\x01s\x00\x02hi";
        let schema = b"{[B{ns";
        let value = extract_exact(data, schema).unwrap();

        let a = value.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(0), Some(&Value::from(1u8)));
        assert_eq!(a.get(1).and_then(|v| v.get("b")), Some(&Value::Null));
        assert_eq!(value.get("s").and_then(Value::as_str), Some("hi"));
    }

    #[test]
    fn test_caller_slices_untouched_and_positions_reported() {
        let data = [0x00, 0x01, 0x02, 0x03];
        let schema = b"BBBB";
        let mut extractor = Extractor::new(&data, schema);
        assert_eq!(extractor.extract(), Ok(Value::from(0u8)));
        assert_eq!(extractor.data_position(), 1);
        assert_eq!(extractor.schema_position(), 1);
        assert_eq!(extractor.finish(), Err(ExtractError::TrailingInput));
        for expected in 1u8..4 {
            assert_eq!(extractor.extract(), Ok(Value::from(expected)));
        }
        assert!(extractor.is_finished());
        assert_eq!(extractor.extract(), Err(ExtractError::SchemaExhausted));
    }

    #[test]
    fn test_error_leaves_positions() {
        // The second value is truncated
        let data = [0x07, 0x00];
        let mut extractor = Extractor::new(&data, b"BI");
        assert_eq!(extractor.extract(), Ok(Value::from(7u8)));
        assert_eq!(extractor.extract(), Err(ExtractError::EndOfData));
        assert_eq!(extractor.data_position(), 1);
        assert_eq!(extractor.schema_position(), 1);
    }

    #[test]
    fn test_ignored_unknown_tag_at_root() {
        let config = ExtractConfig::default().with_unknown_tags(UnknownTagPolicy::Ignore);
        let mut extractor = Extractor::with_config(&[0x09], b"?B", config);
        assert_eq!(extractor.extract(), Ok(Value::Null));
        assert_eq!(extractor.data_position(), 0);
        assert_eq!(extractor.extract(), Ok(Value::from(9u8)));
    }

    #[test]
    fn test_unknown_tag_inside_array() {
        assert_eq!(
            extract(&[0x00, 0x01, 0x01], b"[x"),
            Err(ExtractError::UnknownTag(b'x'))
        );
    }

    #[test]
    fn test_duplicate_keys_overwrite() {
        // {"k": 1, "k": 2}
        let data = b"\x00\x08\x00\x01k\x01\x00\x01k\x02";
        let value = extract(data, b"{BB").unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("k"), Some(&Value::from(2u8)));
    }

    #[test]
    fn test_depth_limit_applies_to_decode() {
        let data = [0x00, 0x02, 0x00, 0x00];
        let config = ExtractConfig::default().with_max_depth(1);
        assert_eq!(
            extract_with_config(&data, b"[[", config),
            Err(ExtractError::MaxDepthReached)
        );
        let config = ExtractConfig::default().with_max_depth(2);
        let value = extract_with_config(&data, b"[[", config).unwrap();
        assert_eq!(value.as_array().map(Array::len), Some(1));
    }

    #[test]
    #[cfg(feature = "float")]
    fn test_floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x00_0Cu16.to_be_bytes());
        data.extend_from_slice(&1.5f32.to_be_bytes());
        data.extend_from_slice(&(-1e300f64).to_be_bytes());
        let value = extract_exact(&data, b"[fd").unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.get(0), Some(&Value::from(1.5f32)));
        assert_eq!(array.get(1), Some(&Value::from(-1e300f64)));
    }

    #[test]
    #[cfg(not(feature = "float"))]
    fn test_floats_not_allowed() {
        assert_eq!(
            extract(&[0, 0, 0, 0], b"f"),
            Err(ExtractError::FloatNotAllowed)
        );
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Writes value trees as a data buffer plus the schema that describes it.
//!
//! This is the producing side of [`extract`](crate::extract): anything the
//! encoder accepts decodes back to an equal tree under an extraction config
//! whose `max_depth` is at least the encoder's. Both default to
//! [`ExtractConfig::DEFAULT_MAX_DEPTH`].

use alloc::vec::Vec;

use crate::config::ExtractConfig;
use crate::value::{Number, Value};
use crate::wire::{host_to_wire16, WireScalar};
use crate::EncodeError;

/// The two streams a value encodes to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Encoded {
    pub data: Vec<u8>,
    pub schema: Vec<u8>,
}

/// Appends encoded values to a data buffer and a schema buffer.
#[derive(Debug)]
pub struct Encoder {
    out: Encoded,
    max_depth: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_max_depth(ExtractConfig::DEFAULT_MAX_DEPTH)
    }

    /// Creates an encoder that refuses trees with more than `max_depth`
    /// arrays/objects open at once.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Encoder {
            out: Encoded::default(),
            max_depth,
        }
    }

    /// Appends one value tree to both streams.
    ///
    /// On error both streams are rolled back to where they were before the
    /// call.
    pub fn encode(&mut self, value: &Value) -> Result<(), EncodeError> {
        let data_len = self.out.data.len();
        let schema_len = self.out.schema.len();
        let result = self.write_value(value, 0);
        if result.is_err() {
            self.out.data.truncate(data_len);
            self.out.schema.truncate(schema_len);
        }
        result
    }

    pub fn finish(self) -> Encoded {
        self.out
    }

    /// `depth` is the number of arrays/objects already open around `value`.
    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), EncodeError> {
        self.out.schema.push(value.tag().byte());
        match value {
            Value::Null => self.out.data.push(0),
            Value::Bool(b) => self.out.data.push(if *b { b't' } else { b'f' }),
            Value::Number(n) => write_number(n, &mut self.out.data),
            Value::String(s) => self.write_string(s.as_bytes())?,
            Value::Array(array) => {
                let start = self.open_composite(depth)?;
                for element in array {
                    self.write_value(element, depth + 1)?;
                }
                self.close_composite(start)?;
            }
            Value::Object(object) => {
                let start = self.open_composite(depth)?;
                for (key, member) in object.iter() {
                    self.write_string(key.as_bytes())?;
                    self.write_value(member, depth + 1)?;
                }
                self.close_composite(start)?;
            }
        }
        Ok(())
    }

    fn write_string(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let len =
            u16::try_from(bytes.len()).map_err(|_| EncodeError::StringTooLong(bytes.len()))?;
        len.write_wire(&mut self.out.data);
        self.out.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Reserves the 2-byte length field and returns its offset.
    fn open_composite(&mut self, depth: usize) -> Result<usize, EncodeError> {
        if depth >= self.max_depth {
            return Err(EncodeError::MaxDepthReached);
        }
        let start = self.out.data.len();
        self.out.data.extend_from_slice(&[0, 0]);
        Ok(start)
    }

    /// Back-patches the length field at `start` with the content size.
    fn close_composite(&mut self, start: usize) -> Result<(), EncodeError> {
        let content = self.out.data.len() - start - 2;
        let len = u16::try_from(content).map_err(|_| EncodeError::ContentTooLong(content))?;
        // `start` came from `open_composite`, which pushed both bytes
        self.out.data[start..start + 2].copy_from_slice(&host_to_wire16(len).to_ne_bytes());
        Ok(())
    }
}

fn write_number(n: &Number, out: &mut Vec<u8>) {
    match *n {
        Number::U8(v) => v.write_wire(out),
        Number::I8(v) => v.write_wire(out),
        Number::U16(v) => v.write_wire(out),
        Number::I16(v) => v.write_wire(out),
        Number::U32(v) => v.write_wire(out),
        Number::I32(v) => v.write_wire(out),
        Number::U64(v) => v.write_wire(out),
        Number::I64(v) => v.write_wire(out),
        #[cfg(feature = "float")]
        Number::F32(v) => v.write_wire(out),
        #[cfg(feature = "float")]
        Number::F64(v) => v.write_wire(out),
    }
}

/// Encodes a single value tree.
///
/// # Example
/// ```
/// use microjson::{encode, extract, Value};
/// let value = Value::from("abc");
/// let encoded = encode(&value).unwrap();
/// assert_eq!(encoded.schema, b"s");
/// assert_eq!(encoded.data, b"\x00\x03abc");
/// assert_eq!(extract(&encoded.data, &encoded.schema), Ok(value));
/// ```
pub fn encode(value: &Value) -> Result<Encoded, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.finish())
}

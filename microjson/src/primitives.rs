// SPDX-License-Identifier: Apache-2.0

//! Fixed-width scalar and length-prefixed string extractors.
//!
//! Each extractor reads at the cursor, converts from wire order where the
//! value is wider than a byte, and advances the cursor past what it read.
//! A read that would run past the end of the buffer fails with `EndOfData`
//! and leaves the cursor where it was.

use crate::cursor::Cursor;
use crate::wire::{self, WireScalar};
use crate::ExtractError;

/// Reads one byte: `'t'` is true, anything else is false.
pub fn extract_bool(cursor: &mut Cursor<'_>) -> Result<bool, ExtractError> {
    Ok(cursor.read_u8()? == b't')
}

macro_rules! define_extractor {
    ($fn_name:ident, $ty:ty) => {
        #[doc = concat!("Reads a wire-order `", stringify!($ty), "`.")]
        pub fn $fn_name(cursor: &mut Cursor<'_>) -> Result<$ty, ExtractError> {
            Ok(<$ty>::read_wire(cursor)?)
        }
    };
}

define_extractor!(extract_uint8, u8);
define_extractor!(extract_int8, i8);
define_extractor!(extract_uint16, u16);
define_extractor!(extract_int16, i16);
define_extractor!(extract_uint32, u32);
define_extractor!(extract_int32, i32);
define_extractor!(extract_uint64, u64);
define_extractor!(extract_int64, i64);
define_extractor!(extract_float, f32);
define_extractor!(extract_double, f64);

/// Reads a 2-byte length and borrows that many payload bytes.
pub fn extract_str<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], ExtractError> {
    let mut lookahead = *cursor;
    let len = extract_uint16(&mut lookahead)?;
    let payload = lookahead.take(usize::from(len))?;
    *cursor = lookahead;
    Ok(payload)
}

/// Copies a length-prefixed string into `dst` and NUL-terminates it.
///
/// `dst` must hold the payload plus the terminator. Returns the payload
/// length. If the payload does not fit, fails with `ScratchBufferFull`
/// without moving the cursor.
pub fn extract_string(cursor: &mut Cursor<'_>, dst: &mut [u8]) -> Result<usize, ExtractError> {
    let mut lookahead = *cursor;
    let payload = extract_str(&mut lookahead)?;
    let (body, terminator) = dst
        .get_mut(..=payload.len())
        .and_then(|d| d.split_last_mut().map(|(last, body)| (body, last)))
        .ok_or(ExtractError::ScratchBufferFull)?;
    wire::copy_bytes(body, payload)?;
    *terminator = 0;
    *cursor = lookahead;
    Ok(payload.len())
}

/// Reads the 2-byte length at the cursor without consuming it.
pub fn peek_length(cursor: &Cursor<'_>) -> Result<u16, ExtractError> {
    let mut lookahead = *cursor;
    extract_uint16(&mut lookahead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bool() {
        let mut cursor = Cursor::new(b"tfx");
        assert_eq!(extract_bool(&mut cursor), Ok(true));
        assert_eq!(extract_bool(&mut cursor), Ok(false));
        assert_eq!(extract_bool(&mut cursor), Ok(false));
        assert_eq!(extract_bool(&mut cursor), Err(ExtractError::EndOfData));
    }

    #[test]
    fn test_extract_scalars_advance_cursor() {
        let data = [
            0x2A, // u8
            0xFF, // i8
            0x01, 0x00, // u16
            0x80, 0x00, 0x00, 0x00, // i32
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // u64
        ];
        let mut cursor = Cursor::new(&data);
        assert_eq!(extract_uint8(&mut cursor), Ok(42));
        assert_eq!(extract_int8(&mut cursor), Ok(-1));
        assert_eq!(extract_uint16(&mut cursor), Ok(256));
        assert_eq!(cursor.position(), 4);
        assert_eq!(extract_int32(&mut cursor), Ok(i32::MIN));
        assert_eq!(extract_uint64(&mut cursor), Ok(1));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_truncated_scalar_keeps_position() {
        let mut cursor = Cursor::new(&[0x00, 0x01, 0x02]);
        assert_eq!(extract_uint32(&mut cursor), Err(ExtractError::EndOfData));
        assert_eq!(cursor.position(), 0);
        assert_eq!(extract_int16(&mut cursor), Ok(1));
    }

    #[test]
    fn test_extract_double() {
        let bytes = (-0.25f64).to_be_bytes();
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(extract_double(&mut cursor), Ok(-0.25));
    }

    #[test]
    fn test_extract_str() {
        let mut cursor = Cursor::new(b"\x00\x03abcz");
        assert_eq!(extract_str(&mut cursor), Ok(&b"abc"[..]));
        assert_eq!(cursor.position(), 5);

        // Declared length longer than the buffer
        let mut cursor = Cursor::new(b"\x00\x09abc");
        assert_eq!(extract_str(&mut cursor), Err(ExtractError::EndOfData));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_extract_string_terminates() {
        let mut cursor = Cursor::new(b"\x00\x03abc");
        let mut dst = [0xAAu8; 4];
        assert_eq!(extract_string(&mut cursor, &mut dst), Ok(3));
        assert_eq!(&dst, b"abc\0");
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_extract_string_needs_room_for_terminator() {
        let mut cursor = Cursor::new(b"\x00\x03abc");
        let mut dst = [0u8; 3];
        assert_eq!(
            extract_string(&mut cursor, &mut dst),
            Err(ExtractError::ScratchBufferFull)
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_string() {
        let mut cursor = Cursor::new(b"\x00\x00");
        let mut dst = [0xAAu8; 1];
        assert_eq!(extract_string(&mut cursor, &mut dst), Ok(0));
        assert_eq!(dst, [0]);
    }

    #[test]
    fn test_peek_length() {
        let cursor = Cursor::new(&[0x01, 0x02, 0xFF]);
        assert_eq!(peek_length(&cursor), Ok(0x0102));
        assert_eq!(cursor.position(), 0);
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Schema type tags.
//!
//! A schema is a flat, pre-order run of these one-byte tags. Composite tags
//! are followed directly by the tags of their children; there are no counts
//! and no terminators.

use crate::ExtractError;

/// One-byte discriminant for a value in the schema stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Null,
    Bool,
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Uint64,
    Int64,
    Float,
    Double,
    String,
    Array,
    Object,
}

impl Tag {
    /// Maps a schema byte to its tag, or `None` if the byte is not a tag.
    pub const fn from_byte(byte: u8) -> Option<Tag> {
        Some(match byte {
            b'n' => Tag::Null,
            b't' => Tag::Bool,
            b'B' => Tag::Uint8,
            b'b' => Tag::Int8,
            b'H' => Tag::Uint16,
            b'h' => Tag::Int16,
            b'I' => Tag::Uint32,
            b'i' => Tag::Int32,
            b'Q' => Tag::Uint64,
            b'q' => Tag::Int64,
            b'f' => Tag::Float,
            b'd' => Tag::Double,
            b's' => Tag::String,
            b'[' => Tag::Array,
            b'{' => Tag::Object,
            _ => return None,
        })
    }

    /// The schema byte for this tag.
    pub const fn byte(self) -> u8 {
        match self {
            Tag::Null => b'n',
            Tag::Bool => b't',
            Tag::Uint8 => b'B',
            Tag::Int8 => b'b',
            Tag::Uint16 => b'H',
            Tag::Int16 => b'h',
            Tag::Uint32 => b'I',
            Tag::Int32 => b'i',
            Tag::Uint64 => b'Q',
            Tag::Int64 => b'q',
            Tag::Float => b'f',
            Tag::Double => b'd',
            Tag::String => b's',
            Tag::Array => b'[',
            Tag::Object => b'{',
        }
    }

    /// Encoded width in the data stream for fixed-width tags.
    ///
    /// Returns `None` for string, array and object, whose size is carried
    /// by a 2-byte length in the data itself.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Tag::Null | Tag::Bool | Tag::Uint8 | Tag::Int8 => Some(1),
            Tag::Uint16 | Tag::Int16 => Some(2),
            Tag::Uint32 | Tag::Int32 | Tag::Float => Some(4),
            Tag::Uint64 | Tag::Int64 | Tag::Double => Some(8),
            Tag::String | Tag::Array | Tag::Object => None,
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = ExtractError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Tag::from_byte(byte).ok_or(ExtractError::UnknownTag(byte))
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.byte()
    }
}

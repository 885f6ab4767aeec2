// SPDX-License-Identifier: Apache-2.0

use crate::cursor;

/// Errors that can occur while extracting a value from a data/schema pair
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// A read ran past the end of the data buffer.
    EndOfData,
    /// The schema ran out of tags before the value tree was complete.
    SchemaExhausted,
    /// A schema byte that is not a known tag.
    UnknownTag(u8),
    /// A composite's declared byte length does not partition into its children.
    MalformedLength,
    /// Nesting went deeper than the configured maximum.
    MaxDepthReached,
    /// The provided destination buffer was not large enough for an operation.
    ScratchBufferFull,
    /// Bytes were left over in the data or schema after the root value.
    TrailingInput,
    /// Float encountered but float support is disabled
    FloatNotAllowed,
    /// The extractor entered an unexpected internal state.
    Unexpected(&'static str),
}

impl From<cursor::Error> for ExtractError {
    fn from(err: cursor::Error) -> Self {
        match err {
            cursor::Error::ReachedEnd => ExtractError::EndOfData,
            cursor::Error::InvalidSliceBounds => {
                ExtractError::Unexpected("Invalid slice bounds in cursor")
            }
        }
    }
}

impl core::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExtractError::EndOfData => f.write_str("truncated input: read past end of data"),
            ExtractError::SchemaExhausted => f.write_str("schema ended before the value did"),
            ExtractError::UnknownTag(tag) => write!(f, "unknown schema tag 0x{tag:02X}"),
            ExtractError::MalformedLength => {
                f.write_str("malformed length: composite size does not match its contents")
            }
            ExtractError::Unexpected(msg) => write!(f, "unexpected state: {msg}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl core::error::Error for ExtractError {}

/// Errors that can occur while encoding a value
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A string or key longer than its 2-byte length field allows.
    StringTooLong(usize),
    /// An array or object whose encoded contents exceed the 2-byte length field.
    ContentTooLong(usize),
    /// Nesting went deeper than the encoder's maximum.
    MaxDepthReached,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::StringTooLong(len) => {
                write!(f, "string of {len} bytes does not fit a 2-byte length")
            }
            EncodeError::ContentTooLong(len) => {
                write!(f, "composite of {len} bytes does not fit a 2-byte length")
            }
            EncodeError::MaxDepthReached => {
                f.write_str("value nests deeper than the maximum depth")
            }
        }
    }
}

impl core::error::Error for EncodeError {}

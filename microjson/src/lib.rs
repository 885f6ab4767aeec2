// SPDX-License-Identifier: Apache-2.0

//! A compact binary codec for JSON-model values on constrained targets.
//!
//! A value tree travels as two parallel byte streams:
//!
//! - the **schema**: one tag byte per value, in pre-order, with no lengths,
//!   counts or separators;
//! - the **data**: fixed-width big-endian scalars, and a 2-byte length in
//!   front of every string, array and object. For arrays and objects that
//!   length is the byte size of the contents, not a child count.
//!
//! [`extract`] walks both streams in lockstep to rebuild the tree and
//! [`encode`] produces them. Every read is bounds checked, composite byte
//! budgets are verified, and nesting depth is capped, so a mismatched or
//! truncated pair fails with an [`ExtractError`] instead of misbehaving.
//!
//! ```
//! use microjson::{extract, Value};
//!
//! // {"x": 7u8}
//! let data = [0x00, 0x04, 0x00, 0x01, b'x', 0x07];
//! let value = extract(&data, b"{B").unwrap();
//! assert_eq!(value.get("x"), Some(&Value::from(7u8)));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod config;
pub use config::{ExtractConfig, UnknownTagPolicy};

pub mod cursor;
pub use cursor::Cursor;

mod encoder;
pub use encoder::{encode, Encoded, Encoder};

mod error;
pub use error::{EncodeError, ExtractError};

mod extractor;
pub use extractor::{extract, extract_exact, extract_with_config, Extractor};

pub mod primitives;

pub mod scan;

mod tags;
pub use tags::Tag;

mod value;
pub use value::{Array, JsonString, Number, NumberKind, Object, Value};

pub mod wire;

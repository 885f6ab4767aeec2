// SPDX-License-Identifier: Apache-2.0

//! Size and length scanning over a data/schema pair.
//!
//! The schema carries no lengths, so the only way to find where a subtree
//! ends in *both* streams is to walk it. `tag_size` measures one value and
//! moves past it; `array_len` and `object_len` walk a composite's byte budget
//! to count its children. All three advance the cursors they are given, so
//! callers that only want to look ahead pass copies.
//!
//! `depth` is the number of arrays/objects already open around the value
//! being scanned.

use log::{trace, warn};

use crate::config::{ExtractConfig, UnknownTagPolicy};
use crate::cursor::Cursor;
use crate::primitives::extract_uint16;
use crate::tags::Tag;
use crate::ExtractError;

/// Consumes one schema byte and resolves it to a tag.
///
/// Returns `Ok(None)` for an unknown byte when the policy is `Ignore`.
pub(crate) fn next_tag(
    schema: &mut Cursor<'_>,
    config: &ExtractConfig,
) -> Result<Option<Tag>, ExtractError> {
    let byte = schema
        .read_u8()
        .map_err(|_| ExtractError::SchemaExhausted)?;
    match (Tag::from_byte(byte), config.unknown_tags) {
        (Some(tag), _) => Ok(Some(tag)),
        (None, UnknownTagPolicy::Error) => Err(ExtractError::UnknownTag(byte)),
        (None, UnknownTagPolicy::Ignore) => {
            warn!(
                "Ignoring unknown schema tag 0x{:02X} at offset {}",
                byte,
                schema.position().saturating_sub(1)
            );
            Ok(None)
        }
    }
}

/// Opens one more level of nesting, failing past `max_depth`.
pub(crate) fn enter(depth: usize, config: &ExtractConfig) -> Result<usize, ExtractError> {
    let depth = depth.checked_add(1).ok_or(ExtractError::MaxDepthReached)?;
    if depth > config.max_depth {
        return Err(ExtractError::MaxDepthReached);
    }
    Ok(depth)
}

/// Takes `size` bytes out of a composite's remaining budget.
///
/// A child that consumed nothing would never exhaust the budget.
fn spend(budget: usize, size: usize) -> Result<usize, ExtractError> {
    if size == 0 {
        return Err(ExtractError::MalformedLength);
    }
    budget
        .checked_sub(size)
        .ok_or(ExtractError::MalformedLength)
}

/// Measures the value at the cursors and moves both past it.
///
/// Returns the number of data bytes the value occupies, including the
/// 2-byte length field of strings, arrays and objects. An ignored unknown
/// tag measures 0.
pub fn tag_size(
    data: &mut Cursor<'_>,
    schema: &mut Cursor<'_>,
    config: &ExtractConfig,
    depth: usize,
) -> Result<usize, ExtractError> {
    let Some(tag) = next_tag(schema, config)? else {
        return Ok(0);
    };
    if let Some(width) = tag.fixed_width() {
        data.skip(width)?;
        return Ok(width);
    }
    let len = match tag {
        Tag::String => {
            let len = usize::from(extract_uint16(data)?);
            data.skip(len)?;
            len
        }
        Tag::Array => {
            let len = usize::from(extract_uint16(data)?);
            data.rewind(2)?;
            array_len(data, schema, config, depth)?;
            len
        }
        Tag::Object => {
            let len = usize::from(extract_uint16(data)?);
            data.rewind(2)?;
            object_len(data, schema, config, depth)?;
            len
        }
        _ => return Err(ExtractError::Unexpected("Fixed-width tag without a width")),
    };
    Ok(len + 2)
}

/// Reads an array's byte budget and counts the elements that exactly fill it.
///
/// Both cursors end up just past the array.
pub fn array_len(
    data: &mut Cursor<'_>,
    schema: &mut Cursor<'_>,
    config: &ExtractConfig,
    depth: usize,
) -> Result<u16, ExtractError> {
    let depth = enter(depth, config)?;
    let start = data.position();
    let mut budget = usize::from(extract_uint16(data)?);
    let mut count: u16 = 0;
    while budget > 0 {
        let size = tag_size(data, schema, config, depth)?;
        budget = spend(budget, size)?;
        count = count.checked_add(1).ok_or(ExtractError::MalformedLength)?;
    }
    trace!("Array at {} holds {} elements", start, count);
    Ok(count)
}

/// Reads an object's byte budget and counts the members that exactly fill it.
///
/// Each member is a 2-byte key length, the key bytes, then one tagged value.
/// Both cursors end up just past the object.
pub fn object_len(
    data: &mut Cursor<'_>,
    schema: &mut Cursor<'_>,
    config: &ExtractConfig,
    depth: usize,
) -> Result<u16, ExtractError> {
    let depth = enter(depth, config)?;
    let start = data.position();
    let mut budget = usize::from(extract_uint16(data)?);
    let mut count: u16 = 0;
    while budget > 0 {
        let key_len = usize::from(extract_uint16(data)?);
        budget = spend(budget, key_len + 2)?;
        data.skip(key_len)?;
        let size = tag_size(data, schema, config, depth)?;
        budget = spend(budget, size)?;
        count = count.checked_add(1).ok_or(ExtractError::MalformedLength)?;
    }
    trace!("Object at {} holds {} members", start, count);
    Ok(count)
}

// SPDX-License-Identifier: Apache-2.0

/// Error type for Cursor operations.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Reached the end of input data.
    ReachedEnd,
    /// Invalid slice bounds provided.
    InvalidSliceBounds,
}

/// A read position into a borrowed byte slice.
///
/// Both the data stream and the schema stream are walked with one of these.
/// The cursor is `Copy`: a lookahead pass takes a copy, walks it, and throws it
/// away without disturbing the original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new Cursor at the start of the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the current position and the end of the data.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the byte at the current position without consuming it.
    pub fn peek_u8(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::ReachedEnd)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let byte = self.peek_u8()?;
        self.pos = self.pos.checked_add(1).ok_or(Error::InvalidSliceBounds)?;
        Ok(byte)
    }

    /// Consumes `n` bytes and returns them as a slice of the underlying data.
    ///
    /// On failure the position is left unchanged.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let end = self.pos.checked_add(n).ok_or(Error::InvalidSliceBounds)?;
        let bytes = self.data.get(self.pos..end).ok_or(Error::ReachedEnd)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Consumes exactly `N` bytes into a fixed-size array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Advances past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.take(n).map(|_| ())
    }

    /// Moves the position back by `n` bytes.
    pub fn rewind(&mut self, n: usize) -> Result<(), Error> {
        self.pos = self.pos.checked_sub(n).ok_or(Error::InvalidSliceBounds)?;
        Ok(())
    }
}

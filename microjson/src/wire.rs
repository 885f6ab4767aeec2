// SPDX-License-Identifier: Apache-2.0

//! Wire byte order conversions and raw byte copies.
//!
//! Multi-byte scalars travel big-endian. The `wire_to_host*` functions take a
//! value whose bytes were copied verbatim off the wire and return it in host
//! order; `host_to_wire*` is the exact inverse.

use alloc::vec::Vec;

use crate::cursor::{self, Cursor};
use crate::ExtractError;

pub const fn wire_to_host16(v: u16) -> u16 {
    u16::from_be(v)
}

pub const fn wire_to_host32(v: u32) -> u32 {
    u32::from_be(v)
}

pub const fn wire_to_host64(v: u64) -> u64 {
    u64::from_be(v)
}

pub fn wire_to_host_float(v: f32) -> f32 {
    f32::from_bits(wire_to_host32(v.to_bits()))
}

pub fn wire_to_host_double(v: f64) -> f64 {
    f64::from_bits(wire_to_host64(v.to_bits()))
}

pub const fn host_to_wire16(v: u16) -> u16 {
    v.to_be()
}

pub const fn host_to_wire32(v: u32) -> u32 {
    v.to_be()
}

pub const fn host_to_wire64(v: u64) -> u64 {
    v.to_be()
}

pub fn host_to_wire_float(v: f32) -> f32 {
    f32::from_bits(host_to_wire32(v.to_bits()))
}

pub fn host_to_wire_double(v: f64) -> f64 {
    f64::from_bits(host_to_wire64(v.to_bits()))
}

/// Copies all of `src` into the front of `dst`.
///
/// Fails with `ScratchBufferFull` if `dst` is shorter than `src`; nothing is
/// written in that case.
pub fn copy_bytes(dst: &mut [u8], src: &[u8]) -> Result<(), ExtractError> {
    dst.get_mut(..src.len())
        .ok_or(ExtractError::ScratchBufferFull)?
        .copy_from_slice(src);
    Ok(())
}

/// A fixed-width scalar with a defined wire representation.
pub trait WireScalar: Sized + Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Reads `WIDTH` bytes at the cursor and converts them to host order.
    fn read_wire(cursor: &mut Cursor<'_>) -> Result<Self, cursor::Error>;

    /// Appends the wire representation of `self`.
    fn write_wire(self, out: &mut Vec<u8>);
}

impl WireScalar for u8 {
    const WIDTH: usize = 1;

    fn read_wire(cursor: &mut Cursor<'_>) -> Result<Self, cursor::Error> {
        cursor.read_u8()
    }

    fn write_wire(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

impl WireScalar for i8 {
    const WIDTH: usize = 1;

    fn read_wire(cursor: &mut Cursor<'_>) -> Result<Self, cursor::Error> {
        cursor.read_u8().map(|b| b as i8)
    }

    fn write_wire(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }
}

/// Implements `WireScalar` for an integer by going through the unsigned type
/// of the same width, mirroring a raw copy followed by a byte order fix.
macro_rules! impl_wire_int {
    ($int_ty:ty, $raw_ty:ty, $to_host:ident, $to_wire:ident) => {
        impl WireScalar for $int_ty {
            const WIDTH: usize = core::mem::size_of::<$raw_ty>();

            fn read_wire(cursor: &mut Cursor<'_>) -> Result<Self, cursor::Error> {
                let raw = <$raw_ty>::from_ne_bytes(cursor.take_array()?);
                Ok($to_host(raw) as $int_ty)
            }

            fn write_wire(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&$to_wire(self as $raw_ty).to_ne_bytes());
            }
        }
    };
}

impl_wire_int!(u16, u16, wire_to_host16, host_to_wire16);
impl_wire_int!(i16, u16, wire_to_host16, host_to_wire16);
impl_wire_int!(u32, u32, wire_to_host32, host_to_wire32);
impl_wire_int!(i32, u32, wire_to_host32, host_to_wire32);
impl_wire_int!(u64, u64, wire_to_host64, host_to_wire64);
impl_wire_int!(i64, u64, wire_to_host64, host_to_wire64);

macro_rules! impl_wire_float {
    ($float_ty:ty, $to_host:ident, $to_wire:ident) => {
        impl WireScalar for $float_ty {
            const WIDTH: usize = core::mem::size_of::<$float_ty>();

            fn read_wire(cursor: &mut Cursor<'_>) -> Result<Self, cursor::Error> {
                let raw = <$float_ty>::from_ne_bytes(cursor.take_array()?);
                Ok($to_host(raw))
            }

            fn write_wire(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&$to_wire(self).to_ne_bytes());
            }
        }
    };
}

impl_wire_float!(f32, wire_to_host_float, host_to_wire_float);
impl_wire_float!(f64, wire_to_host_double, host_to_wire_double);

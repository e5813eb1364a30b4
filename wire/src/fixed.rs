//! Fixed-width integer and floating point encoding.
//!
//! Fixed-width values are always written little-endian (least significant byte first) and
//! always take their full width, regardless of value.
//!
//! Floats are never converted numerically: the IEEE-754 bit pattern is reinterpreted as an
//! unsigned integer of the same width (`to_bits`) and written as a fixed-width integer. NaN
//! payloads and the sign of zero therefore survive unchanged.

use crate::Error;
use bytes::{Buf, BufMut};

/// Number of bytes in a fixed32 value.
pub const FIXED32_LEN: usize = 4;

/// Number of bytes in a fixed64 value.
pub const FIXED64_LEN: usize = 8;

/// Writes a `u32` as 4 little-endian bytes.
#[inline]
pub fn write32(value: u32, buf: &mut impl BufMut) {
    buf.put_u32_le(value);
}

/// Writes a `u64` as 8 little-endian bytes.
#[inline]
pub fn write64(value: u64, buf: &mut impl BufMut) {
    buf.put_u64_le(value);
}

/// Writes the bit pattern of an `f32` as a fixed32.
#[inline]
pub fn write_float(value: f32, buf: &mut impl BufMut) {
    write32(value.to_bits(), buf);
}

/// Writes the bit pattern of an `f64` as a fixed64.
#[inline]
pub fn write_double(value: f64, buf: &mut impl BufMut) {
    write64(value.to_bits(), buf);
}

/// Reads a little-endian fixed32.
pub fn read32(buf: &mut impl Buf) -> Result<u32, Error> {
    at_least(buf, FIXED32_LEN)?;
    Ok(buf.get_u32_le())
}

/// Reads a little-endian fixed64.
pub fn read64(buf: &mut impl Buf) -> Result<u64, Error> {
    at_least(buf, FIXED64_LEN)?;
    Ok(buf.get_u64_le())
}

/// Reads a fixed32 and reinterprets it as an `f32`.
pub fn read_float(buf: &mut impl Buf) -> Result<f32, Error> {
    read32(buf).map(f32::from_bits)
}

/// Reads a fixed64 and reinterprets it as an `f64`.
pub fn read_double(buf: &mut impl Buf) -> Result<f64, Error> {
    read64(buf).map(f64::from_bits)
}

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub(crate) fn at_least(buf: &impl Buf, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

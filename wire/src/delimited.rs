//! Length-delimited payloads.
//!
//! A payload is written as a varint byte length followed by the raw bytes. There is no
//! terminator: a reader relies solely on the declared length.
//!
//! For portability and consistency between architectures, the length must fit within a [u32].

use crate::{fixed::at_least, varint, Error};
use bytes::{Buf, BufMut, Bytes};

/// Returns the length prefix for a payload of `len` bytes.
#[inline]
pub fn prefix(len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| Error::LengthExceeded(len, u32::MAX as usize))
}

/// Writes `payload` with its length prefix.
pub fn write(payload: &[u8], buf: &mut impl BufMut) -> Result<(), Error> {
    varint::write(prefix(payload.len())?, buf);
    buf.put_slice(payload);
    Ok(())
}

/// Returns the number of bytes [write] produces for a payload of `len` bytes.
pub fn size(len: usize) -> Result<usize, Error> {
    Ok(varint::size(prefix(len)?) + len)
}

/// Reads a length-delimited payload.
pub fn read(buf: &mut impl Buf) -> Result<Bytes, Error> {
    let len = varint::read::<u32>(buf)? as usize;
    at_least(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

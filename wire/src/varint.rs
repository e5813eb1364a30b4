//! Variable-length integer encoding and decoding
//!
//! This module implements Google's Protocol Buffers variable-length integer encoding.
//! Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Groups are written least significant first. Signed values are not ZigZag'ed: a negative
//! value is written as its (widened) two's-complement bit pattern, see [sign_extend].
//!
//! `usize` and `isize` are omitted to prevent behavior from depending on the target architecture.

use crate::Error;
use bytes::{Buf, BufMut};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// Maximum number of bytes needed to encode a `u32` as a varint.
pub const MAX_VARINT32_LEN: usize = 5;

/// Maximum number of bytes needed to encode a `u64` as a varint.
pub const MAX_VARINT64_LEN: usize = 10;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

// Implements the `UInt` trait for the unsigned integer types used on the wire.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uint!(u32);
impl_uint!(u64);

/// Widens a signed 32-bit value to its 64-bit two's-complement bit pattern.
///
/// Negative values keep their sign (`-1` becomes `u64::MAX`), so they always encode to
/// [MAX_VARINT64_LEN] bytes.
#[inline]
pub fn sign_extend(value: i32) -> u64 {
    i64::from(value) as u64
}

/// Encodes an unsigned integer as a varint
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) {
    let continuation_threshold = T::from(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for tags and lengths).
        buf.put_u8(value.as_u8());
        return;
    }

    let mut val = value;
    while val >= continuation_threshold {
        buf.put_u8((val.as_u8() & DATA_BITS_MASK) | CONTINUATION_BIT_MASK);
        val >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(val.as_u8());
}

/// Decodes an unsigned integer from a varint
///
/// Rejects encodings that set bits beyond the width of `T`.
pub fn read<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    let max_bits = std::mem::size_of::<T>() * BITS_PER_BYTE;
    let mut result: T = T::from(0);
    let mut shift = 0;

    loop {
        if !buf.has_remaining() {
            return Err(Error::EndOfBuffer);
        }
        let byte = buf.get_u8();

        // If this must be the last byte, check for overflow (i.e. set bits beyond the size of T).
        // Because the continuation bit is the most-significant bit, this check also rejects
        // a continuation bit on the last possible byte.
        let remaining_bits = max_bits - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Error::InvalidVarint);
            }
        }

        result |= T::from(byte & DATA_BITS_MASK) << shift;
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size<T: UInt>(value: T) -> usize {
    let total_bits = std::mem::size_of::<T>() * BITS_PER_BYTE;
    let leading_zeros = value.leading_zeros() as usize;
    let data_bits = total_bits - leading_zeros;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use proptest::prelude::*;
    use test_case::test_case;

    fn encode<T: UInt>(value: T) -> Vec<u8> {
        let mut buf = Vec::new();
        write(value, &mut buf);
        buf
    }

    #[test_case(0, &[0x00]; "zero")]
    #[test_case(1, &[0x01]; "one")]
    #[test_case(127, &[0x7F]; "largest single byte")]
    #[test_case(128, &[0x80, 0x01]; "smallest two bytes")]
    #[test_case(300, &[0xAC, 0x02]; "three hundred")]
    #[test_case(16_383, &[0xFF, 0x7F]; "largest two bytes")]
    #[test_case(16_384, &[0x80, 0x80, 0x01]; "smallest three bytes")]
    #[test_case(u32::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]; "u32 max")]
    fn test_varint32_conformity(value: u32, expected: &[u8]) {
        assert_eq!(encode(value), expected);
        assert_eq!(size(value), expected.len());
    }

    #[test]
    fn test_varint64_conformity() {
        assert_eq!(encode(0u64), [0x00]);
        assert_eq!(encode(300u64), [0xAC, 0x02]);
        assert_eq!(encode(u32::MAX as u64 + 1), [0x80, 0x80, 0x80, 0x80, 0x10]);
        assert_eq!(
            encode(u64::MAX),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
        assert_eq!(size(u64::MAX), MAX_VARINT64_LEN);
        assert_eq!(size(u32::MAX), MAX_VARINT32_LEN);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0), 0);
        assert_eq!(sign_extend(1), 1);
        assert_eq!(sign_extend(i32::MAX), i32::MAX as u64);
        assert_eq!(sign_extend(-1), u64::MAX);
        assert_eq!(sign_extend(i32::MIN), 0xFFFF_FFFF_8000_0000);

        // Negative values always take the full width.
        assert_eq!(
            encode(sign_extend(-1)),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
        assert_eq!(size(sign_extend(i32::MIN)), MAX_VARINT64_LEN);
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::EndOfBuffer)));

        let mut buf = Bytes::new();
        assert!(matches!(read::<u32>(&mut buf), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_invalid() {
        let mut buf =
            Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::InvalidVarint)));

        // A 6-byte varint can never be a u32.
        let mut buf = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert!(matches!(read::<u32>(&mut buf), Err(Error::InvalidVarint)));

        // Fifth byte of a u32 may only carry 4 bits.
        let mut buf = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]);
        assert!(matches!(read::<u32>(&mut buf), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_read_leaves_trailing_bytes() {
        let mut buf = &[0xAC, 0x02, 0x07][..];
        assert_eq!(read::<u32>(&mut buf).unwrap(), 300);
        assert_eq!(buf, &[0x07]);
    }

    proptest! {
        #[test]
        fn test_varint32_roundtrip(value: u32) {
            let encoded = encode(value);
            let expected_len = usize::max(1, (32 - value.leading_zeros() as usize).div_ceil(7));
            prop_assert_eq!(encoded.len(), expected_len);
            prop_assert!(encoded.len() <= MAX_VARINT32_LEN);

            // Continuation bit on every byte but the last.
            let (last, rest) = encoded.split_last().unwrap();
            prop_assert_eq!(last & CONTINUATION_BIT_MASK, 0);
            prop_assert!(rest.iter().all(|b| b & CONTINUATION_BIT_MASK != 0));

            let mut read_buf = &encoded[..];
            prop_assert_eq!(read::<u32>(&mut read_buf).unwrap(), value);
            prop_assert_eq!(read_buf.len(), 0);
        }

        #[test]
        fn test_varint64_roundtrip(value: u64) {
            let encoded = encode(value);
            prop_assert_eq!(encoded.len(), size(value));
            prop_assert!(encoded.len() <= MAX_VARINT64_LEN);

            let mut read_buf = &encoded[..];
            prop_assert_eq!(read::<u64>(&mut read_buf).unwrap(), value);
            prop_assert_eq!(read_buf.len(), 0);
        }

        #[test]
        fn test_sign_extend_preserves_value(value: i32) {
            prop_assert_eq!(sign_extend(value) as i64, value as i64);
        }
    }
}

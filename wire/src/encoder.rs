//! Write typed values to a [Sink].
//!
//! Every operation reduces its value to one or more canonical byte spans and hands each span
//! to the sink immediately, in call order. Nothing is buffered between calls: varints and
//! fixed-width values are assembled in a stack array and written in a single sink call.
//!
//! # Failures
//!
//! All operations return the first error reported by the sink and stop. Composite operations
//! ([Encoder::write_string], [Encoder::write_bytes]) are not transactional: if the payload write
//! fails after the length prefix was accepted, the destination holds a partial record.

use crate::{
    delimited, fixed,
    fixed::{FIXED32_LEN, FIXED64_LEN},
    tag,
    tag::WireType,
    varint,
    varint::{MAX_VARINT32_LEN, MAX_VARINT64_LEN},
    Error, Sink,
};
use tracing::{debug, trace};

/// How [Encoder::write_int32] encodes negative values.
///
/// Non-negative values encode identically under both policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Int32Encoding {
    /// Widen to 64-bit two's complement before encoding (10 bytes for any negative value).
    ///
    /// This matches decoders that treat `int32` as a 64-bit-widened value on the wire.
    #[default]
    SignExtended,

    /// Encode the raw 32-bit pattern as a 32-bit varint (5 bytes for any negative value).
    ///
    /// Older writers produced this form. Decoders that widen `int32` on the wire will not read
    /// the original value back, so only use this to stay byte-compatible with existing
    /// consumers of that output.
    Legacy,
}

/// Configuration for an [Encoder].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Encoding used by [Encoder::write_int32].
    pub int32: Int32Encoding,
}

/// Writes primitive values to a borrowed [Sink].
///
/// The encoder holds no state besides the sink and its [Config]. Dropping it flushes nothing.
pub struct Encoder<'a, S: Sink + ?Sized> {
    sink: &'a mut S,
    cfg: Config,
}

impl<'a, S: Sink + ?Sized> Encoder<'a, S> {
    /// Create a new [Encoder] with the default [Config].
    pub fn new(sink: &'a mut S) -> Self {
        Self::with_config(sink, Config::default())
    }

    /// Create a new [Encoder] with the provided [Config].
    pub fn with_config(sink: &'a mut S, cfg: Config) -> Self {
        Self { sink, cfg }
    }

    /// Returns the [Config] of this encoder.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Write `buf` to the sink as-is.
    pub fn write_raw(&mut self, buf: &[u8]) -> Result<(), Error> {
        trace!(len = buf.len(), "writing to sink");
        if let Err(err) = self.sink.write(buf) {
            debug!(len = buf.len(), ?err, "sink rejected write");
            return Err(err);
        }
        Ok(())
    }

    /// Write the tag for `field` and `wire_type`.
    ///
    /// `field` should not exceed [tag::Tag::MAX_FIELD]. It is not checked: in every build profile
    /// the bits above it are dropped from the tag, so the write succeeds with a different field.
    pub fn write_tag(&mut self, field: u32, wire_type: WireType) -> Result<(), Error> {
        self.write_scratch::<MAX_VARINT32_LEN>(|buf| tag::write(field, wire_type, buf))
    }

    /// Write a `u32` as a varint (at most 5 bytes).
    pub fn write_varint32(&mut self, value: u32) -> Result<(), Error> {
        self.write_scratch::<MAX_VARINT32_LEN>(|buf| varint::write(value, buf))
    }

    /// Write a `u64` as a varint (at most 10 bytes).
    pub fn write_varint64(&mut self, value: u64) -> Result<(), Error> {
        self.write_scratch::<MAX_VARINT64_LEN>(|buf| varint::write(value, buf))
    }

    /// Write an `i32` as a varint, widening negative values to 64 bits first.
    ///
    /// Non-negative values take at most 5 bytes, negative values always take 10.
    pub fn write_varint32_sign_extended(&mut self, value: i32) -> Result<(), Error> {
        if value < 0 {
            self.write_varint64(varint::sign_extend(value))
        } else {
            self.write_varint32(value as u32)
        }
    }

    /// Write a `u32` as 4 little-endian bytes.
    pub fn write_fixed32(&mut self, value: u32) -> Result<(), Error> {
        self.write_scratch::<FIXED32_LEN>(|buf| fixed::write32(value, buf))
    }

    /// Write a `u64` as 8 little-endian bytes.
    pub fn write_fixed64(&mut self, value: u64) -> Result<(), Error> {
        self.write_scratch::<FIXED64_LEN>(|buf| fixed::write64(value, buf))
    }

    /// Write the IEEE-754 bit pattern of an `f32` as a fixed32.
    pub fn write_float(&mut self, value: f32) -> Result<(), Error> {
        self.write_scratch::<FIXED32_LEN>(|buf| fixed::write_float(value, buf))
    }

    /// Write the IEEE-754 bit pattern of an `f64` as a fixed64.
    pub fn write_double(&mut self, value: f64) -> Result<(), Error> {
        self.write_scratch::<FIXED64_LEN>(|buf| fixed::write_double(value, buf))
    }

    /// Write an `i32` according to [Config::int32].
    pub fn write_int32(&mut self, value: i32) -> Result<(), Error> {
        match self.cfg.int32 {
            Int32Encoding::SignExtended => self.write_varint32_sign_extended(value),
            Int32Encoding::Legacy => self.write_varint32(value as u32),
        }
    }

    /// Write a `u32` as a varint.
    pub fn write_uint32(&mut self, value: u32) -> Result<(), Error> {
        self.write_varint32(value)
    }

    /// Write the two's-complement bit pattern of an `i64` as a varint.
    pub fn write_int64(&mut self, value: i64) -> Result<(), Error> {
        self.write_varint64(value as u64)
    }

    /// Write a `u64` as a varint.
    pub fn write_uint64(&mut self, value: u64) -> Result<(), Error> {
        self.write_varint64(value)
    }

    /// Write the UTF-8 bytes of `value` with a varint length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<(), Error> {
        self.write_bytes(value.as_bytes())
    }

    /// Write `payload` with a varint length prefix.
    ///
    /// Issues two sink writes: the prefix, then the payload (even when empty).
    pub fn write_bytes(&mut self, payload: &[u8]) -> Result<(), Error> {
        let len = delimited::prefix(payload.len())?;
        self.write_varint32(len)?;
        self.write_raw(payload)
    }

    /// Assemble at most `N` bytes on the stack and write them to the sink in one call.
    fn write_scratch<const N: usize>(
        &mut self,
        encode: impl FnOnce(&mut &mut [u8]),
    ) -> Result<(), Error> {
        let mut scratch = [0u8; N];
        let unused = {
            let mut cursor = &mut scratch[..];
            encode(&mut cursor);
            cursor.len()
        };
        self.write_raw(&scratch[..N - unused])
    }
}

//! Encode primitive values into a tag-prefixed binary wire format.
//!
//! # Overview
//!
//! The lowest layer of a structured serialization stack: an [Encoder] turns integers, floats and
//! byte strings into the compact, Protocol Buffers-style encoding below and pushes the bytes to a
//! [Sink] as soon as each value is encoded.
//!
//! | Element | Encoding |
//! |---|---|
//! | Tag | varint of `(field << 3) \| wire_type` |
//! | Varint | base-128, least significant group first, `0x80` continuation bit |
//! | Fixed32 / Fixed64 | 4 / 8 little-endian bytes |
//! | Float / Double | IEEE-754 bit pattern as Fixed32 / Fixed64 |
//! | Length-delimited | varint byte length, then the bytes (no terminator) |
//! | `int32` | widened to 64 bits, then varint (see [Int32Encoding]) |
//! | `int64` | two's-complement bit pattern as varint |
//!
//! Which field numbers and wire types to use is up to the caller; nothing is validated against
//! a schema.
//!
//! # Example
//!
//! ```
//! use commonware_wire::{Encoder, WireType};
//!
//! let mut sink: Vec<u8> = Vec::new();
//! let mut encoder = Encoder::new(&mut sink);
//! encoder.write_tag(1, WireType::Varint).unwrap();
//! encoder.write_uint32(300).unwrap();
//! encoder.write_tag(2, WireType::LengthDelimited).unwrap();
//! encoder.write_string("ab").unwrap();
//!
//! assert_eq!(sink, [0x08, 0xAC, 0x02, 0x12, 0x02, 0x61, 0x62]);
//! ```
//!
//! # Custom Sinks
//!
//! Any destination can be used by implementing [Sink]. A closure works too:
//!
//! ```
//! use commonware_wire::{Encoder, FnSink};
//!
//! let mut written = 0;
//! let mut sink = FnSink::new(|buf: &[u8]| {
//!     written += buf.len();
//!     written <= 4
//! });
//! let mut encoder = Encoder::new(&mut sink);
//! assert!(encoder.write_fixed32(1).is_ok());
//! assert!(encoder.write_fixed32(2).is_err());
//! ```

pub mod delimited;
pub mod encoder;
pub mod error;
pub mod fixed;
pub mod sink;
pub mod tag;
pub mod varint;

// Re-export main types and traits
pub use encoder::{Config, Encoder, Int32Encoding};
pub use error::Error;
pub use sink::{FnSink, IoSink, Sink};
pub use tag::{Tag, WireType};

//! Field tags.
//!
//! A tag prefixes every field on the wire. It packs a field number and a [WireType] into one
//! `u32` as `(field << 3) | wire_type` and is written as a varint.

use crate::{varint, Error};
use bytes::{Buf, BufMut};
use std::fmt;

/// Number of low bits of a tag that hold the [WireType].
const WIRE_TYPE_BITS: u32 = 3;
const WIRE_TYPE_MASK: u32 = (1 << WIRE_TYPE_BITS) - 1;

/// Describes how the payload following a tag is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint.
    Varint = 0,
    /// 8 little-endian bytes.
    Fixed64 = 1,
    /// Varint length followed by that many bytes.
    LengthDelimited = 2,
    /// 4 little-endian bytes.
    Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            other => Err(Error::InvalidWireType(other)),
        }
    }
}

/// A field number paired with the [WireType] of its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    field: u32,
    wire_type: WireType,
}

impl Tag {
    /// Largest field number whose tag still fits in a `u32`.
    pub const MAX_FIELD: u32 = u32::MAX >> WIRE_TYPE_BITS;

    /// Creates a new tag.
    ///
    /// The field number is not validated. Bits of a field above [Tag::MAX_FIELD] are shifted out
    /// of [Tag::value].
    pub fn new(field: u32, wire_type: WireType) -> Self {
        Self { field, wire_type }
    }

    /// Returns the field number.
    pub fn field(&self) -> u32 {
        self.field
    }

    /// Returns the wire type.
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Returns the packed `(field << 3) | wire_type` value.
    pub fn value(&self) -> u32 {
        (self.field << WIRE_TYPE_BITS) | self.wire_type as u32
    }
}

impl From<Tag> for u32 {
    fn from(tag: Tag) -> Self {
        tag.value()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.field, self.wire_type)
    }
}

/// Writes the tag for `field` and `wire_type` as a varint.
pub fn write(field: u32, wire_type: WireType, buf: &mut impl BufMut) {
    varint::write(Tag::new(field, wire_type).value(), buf);
}

/// Returns the number of bytes [write] produces for `field` and `wire_type`.
pub fn size(field: u32, wire_type: WireType) -> usize {
    varint::size(Tag::new(field, wire_type).value())
}

/// Reads a tag.
pub fn read(buf: &mut impl Buf) -> Result<Tag, Error> {
    let value: u32 = varint::read(buf)?;
    let wire_type = WireType::try_from((value & WIRE_TYPE_MASK) as u8)?;
    Ok(Tag {
        field: value >> WIRE_TYPE_BITS,
        wire_type,
    })
}

//! Error types for wire operations

use thiserror::Error;

/// Error type for wire operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("sink write failed")]
    SinkFailed,
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid varint")]
    InvalidVarint,
    #[error("invalid wire type: {0}")]
    InvalidWireType(u8),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
}

impl Error {
    /// Returns true if the error was reported by a [crate::Sink].
    ///
    /// Both [Error::SinkFailed] and [Error::Io] are the same failure kind from the
    /// encoder's perspective: the destination did not accept the bytes.
    pub fn is_sink(&self) -> bool {
        matches!(self, Error::SinkFailed | Error::Io(_))
    }
}

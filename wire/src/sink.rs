//! Destinations for encoded bytes.
//!
//! A [Sink] accepts one span of bytes at a time and reports whether it was accepted. The
//! [crate::Encoder] borrows a sink for its lifetime and never owns it.
//!
//! State that a callback-style destination needs (a file handle, a counter, a socket) lives in
//! the sink itself or, for [FnSink], in whatever the closure captures.

use crate::Error;
use bytes::{BufMut, BytesMut};

pub mod mocks;

/// Interface that any destination of encoded bytes must implement.
pub trait Sink {
    /// Accept all of `buf` or fail.
    ///
    /// A failed write may have consumed part of `buf`; callers do not retry.
    fn write(&mut self, buf: &[u8]) -> Result<(), Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        (**self).write(buf)
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

impl Sink for BytesMut {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.put_slice(buf);
        Ok(())
    }
}

/// A [Sink] that forwards to any [std::io::Write].
///
/// Each write is issued with `write_all`. Failures surface as [Error::Io].
#[derive(Debug)]
pub struct IoSink<W: std::io::Write> {
    inner: W,
}

impl<W: std::io::Write> IoSink<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flushes the wrapped writer.
    ///
    /// The encoder never calls this; it is up to the owner of the sink.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: std::io::Write> Sink for IoSink<W> {
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.inner.write_all(buf)?;
        Ok(())
    }
}

/// A [Sink] backed by a callback that returns whether the bytes were accepted.
pub struct FnSink<F>
where
    F: FnMut(&[u8]) -> bool,
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&[u8]) -> bool,
{
    /// Creates a sink that invokes `f` for every write.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&[u8]) -> bool,
{
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        if (self.f)(buf) {
            Ok(())
        } else {
            Err(Error::SinkFailed)
        }
    }
}

//! Mock [Sink] for observing and failing writes.

use super::Sink;
use crate::Error;

/// A mock [Sink] that records every write as a separate chunk.
///
/// Once configured with [Recorder::fail_at], the write with that (0-indexed) position and
/// every write after it is rejected with [Error::SinkFailed] without being recorded.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    chunks: Vec<Vec<u8>>,
    attempts: usize,
    fail_at: Option<usize>,
}

impl Recorder {
    /// Create a new [Recorder] that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [Recorder] whose `n`th write (0-indexed) and all later writes fail.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    /// Reject the `n`th write (0-indexed) and all later writes.
    pub fn fail_at(&mut self, n: usize) {
        self.fail_at = Some(n);
    }

    /// Chunks accepted so far, in write order.
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// All accepted bytes, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    /// Number of writes attempted, including rejected ones.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Sink for Recorder {
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_at.is_some_and(|n| index >= n) {
            return Err(Error::SinkFailed);
        }
        self.chunks.push(buf.to_vec());
        Ok(())
    }
}

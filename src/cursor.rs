// ABOUTME: Bounds-checked sequential reader over an immutable byte buffer
// ABOUTME: All PDU and container decoding reads through this type and fails instead of overrunning

use crate::error::{DecodeError, DecodeResult};
use bytes::Buf;
use std::io::Cursor;

/// Sequential reader over a borrowed byte buffer.
///
/// Invariant: `0 <= position <= len`. Every successful read advances the position by
/// exactly the number of bytes returned.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(buf),
        }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    /// Take the next `n` bytes, failing with `BufferUnderrun` if fewer remain
    pub fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::BufferUnderrun {
                requested: n,
                remaining,
                offset: self.position(),
            });
        }
        Ok(self.split_off(n))
    }

    /// Take up to `n` bytes; returns fewer when the buffer ends first
    pub fn take_up_to(&mut self, n: usize) -> &'a [u8] {
        let n = n.min(self.remaining());
        self.split_off(n)
    }

    pub fn take_byte(&mut self) -> DecodeResult<u8> {
        if !self.inner.has_remaining() {
            return Err(DecodeError::BufferUnderrun {
                requested: 1,
                remaining: 0,
                offset: self.position(),
            });
        }
        Ok(self.inner.get_u8())
    }

    /// Take exactly `N` bytes as an array
    pub fn take_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Look at up to `n` upcoming bytes without advancing
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let rest = self.rest();
        &rest[..n.min(rest.len())]
    }

    /// Consume everything that is left
    pub fn take_rest(&mut self) -> &'a [u8] {
        self.take_up_to(self.remaining())
    }

    fn rest(&self) -> &'a [u8] {
        let buf: &'a [u8] = *self.inner.get_ref();
        &buf[self.position().min(buf.len())..]
    }

    fn split_off(&mut self, n: usize) -> &'a [u8] {
        let out = &self.rest()[..n];
        self.inner.advance(n);
        out
    }
}

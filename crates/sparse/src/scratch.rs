//! Growable byte buffer holding the name or value currently being read.
//!
//! The scratch is owned by the parser and outlives individual `feed` calls,
//! which is what lets a token span any number of chunks. Emitting a token
//! clears the buffer logically; the allocation is kept and only ever grows.
//!
//! Growth doubles the capacity, or jumps straight to the required size when
//! doubling is not enough. Reservation is fallible so an allocation failure
//! surfaces as [`ErrorKind::OutOfMemory`](crate::ErrorKind::OutOfMemory)
//! instead of aborting the process.
//!
//! Alongside the bytes the scratch counts the ASCII spaces at its tail. A
//! flush with trimming enabled reports the token without that run, without
//! copying anything.

use alloc::{collections::TryReserveError, vec::Vec};

use tracing::trace;

#[derive(Debug)]
pub(crate) struct Scratch {
    bytes: Vec<u8>,
    trailing_spaces: usize,
}

impl Scratch {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity)?;
        Ok(Self {
            bytes,
            trailing_spaces: 0,
        })
    }

    /// Makes room for `additional` more bytes.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = self.len() + additional;
        let capacity = self.bytes.capacity();
        if needed <= capacity {
            return Ok(());
        }

        let target = capacity.saturating_mul(2).max(needed);
        self.bytes.try_reserve_exact(target - self.bytes.len())?;
        trace!(from = capacity, to = self.bytes.capacity(), "scratch grew");
        Ok(())
    }

    /// Appends a content byte; spaces extend the trailing run.
    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Result<(), TryReserveError> {
        self.reserve(1)?;
        self.bytes.push(byte);
        if byte == b' ' {
            self.trailing_spaces += 1;
        } else {
            self.trailing_spaces = 0;
        }
        Ok(())
    }

    /// Appends a byte that trimming must never remove, such as an escaped
    /// space.
    #[inline]
    pub(crate) fn push_literal(&mut self, byte: u8) -> Result<(), TryReserveError> {
        self.reserve(1)?;
        self.bytes.push(byte);
        self.trailing_spaces = 0;
        Ok(())
    }

    /// The accumulated token, optionally without its trailing spaces.
    #[inline]
    pub(crate) fn token(&self, trim: bool) -> &[u8] {
        if trim {
            &self.bytes[..self.bytes.len() - self.trailing_spaces]
        } else {
            &self.bytes
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
        self.trailing_spaces = 0;
    }

    /// Frees the allocation. Used once input has ended.
    pub(crate) fn release(&mut self) {
        self.bytes = Vec::new();
        self.trailing_spaces = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::Scratch;

    fn filled(text: &[u8]) -> Scratch {
        let mut scratch = Scratch::with_capacity(4).unwrap();
        for &b in text {
            scratch.push(b).unwrap();
        }
        scratch
    }

    #[test]
    fn starts_with_requested_capacity() {
        let scratch = Scratch::with_capacity(16).unwrap();
        assert!(scratch.capacity() >= 16);
        assert_eq!(scratch.len(), 0);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let scratch = filled(b"abcdefghij");
        assert_eq!(scratch.token(false), b"abcdefghij");
        assert!(scratch.capacity() >= 10);
    }

    #[test]
    fn reserve_jumps_to_need_when_doubling_is_short() {
        let mut scratch = Scratch::with_capacity(2).unwrap();
        scratch.reserve(100).unwrap();
        assert!(scratch.capacity() >= 100);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut scratch = filled(b"abcdefghijklmnop");
        let capacity = scratch.capacity();
        scratch.clear();
        assert_eq!(scratch.len(), 0);
        assert_eq!(scratch.capacity(), capacity);
    }

    #[test]
    fn trim_drops_only_trailing_spaces() {
        let scratch = filled(b"a b  ");
        assert_eq!(scratch.token(true), b"a b");
        assert_eq!(scratch.token(false), b"a b  ");
    }

    #[test]
    fn tabs_end_the_trailing_run() {
        let scratch = filled(b"a \t ");
        assert_eq!(scratch.token(true), b"a \t");
    }

    #[test]
    fn literal_space_is_never_trimmed() {
        let mut scratch = filled(b"a ");
        scratch.push_literal(b' ').unwrap();
        assert_eq!(scratch.token(true), b"a  ");
    }

    #[test]
    fn release_frees_storage() {
        let mut scratch = filled(b"abc");
        scratch.release();
        assert_eq!(scratch.capacity(), 0);
        assert_eq!(scratch.token(true), b"");
    }
}

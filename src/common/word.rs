// src/common/word.rs

use super::crc::{calculate_crc8, verify_word_crc};
use super::error::Scd30Error;
use core::fmt::Debug;

/// Bytes taken by one checksum-protected word on the wire: 2 data + 1 CRC.
pub const WORD_FRAME_LEN: usize = 3;

/// Big-endian encoding of a 16-bit word.
#[inline]
pub const fn encode_word(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// A word as the sensor sends it: `[hi, lo, crc(hi, lo)]`.
pub fn frame_word(value: u16) -> [u8; WORD_FRAME_LEN] {
    let [hi, lo] = encode_word(value);
    [hi, lo, calculate_crc8(&[hi, lo])]
}

/// Bounded reader over a reply buffer made of 3-byte word frames.
///
/// Each read either consumes a whole frame and returns the decoded value, or
/// fails and leaves the position where it was.
#[derive(Debug, Clone)]
pub struct WordCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WordCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WordCursor { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads one checksum-validated big-endian word.
    pub fn read_word<E: Debug>(&mut self) -> Result<u16, Scd30Error<E>> {
        let frame = self
            .buf
            .get(self.pos..self.pos + WORD_FRAME_LEN)
            .ok_or(Scd30Error::<E>::Truncated { needed: WORD_FRAME_LEN, got: self.remaining() })?;

        let data = [frame[0], frame[1]];
        verify_word_crc::<E>(data, frame[2])?;

        self.pos += WORD_FRAME_LEN;
        Ok(u16::from_be_bytes(data))
    }

    /// Reads two words and reinterprets their four bytes, in order, as a
    /// big-endian IEEE-754 `f32`. The bit pattern is kept as is.
    ///
    /// On failure of the second word the first one stays consumed; the
    /// caller discards the cursor anyway.
    pub fn read_f32<E: Debug>(&mut self) -> Result<f32, Scd30Error<E>> {
        let high = self.read_word::<E>()?;
        let low = self.read_word::<E>()?;
        Ok(f32::from_bits((u32::from(high) << 16) | u32::from(low)))
    }
}

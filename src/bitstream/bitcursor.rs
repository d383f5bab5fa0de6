//! BitCursor: reads a BitVec front to back.
//!
//! Every read returns `None` once the logical end of the vector is reached, so
//! callers decide what running out of bits means for them (a truncated tree
//! header, a payload cut mid-symbol, ...).

use super::bitvec::BitVec;

#[derive(Debug)]
pub struct BitCursor<'a> {
    source: &'a BitVec,
    position: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(source: &'a BitVec) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Return the next bit, or None if there is no more data to read.
    pub fn bit(&mut self) -> Option<bool> {
        let bit = self.source.get(self.position).ok()?;
        self.position += 1;
        Some(bit)
    }

    /// Return the next n bits (n <= 64) as an integer, most significant first.
    /// Nothing is consumed when fewer than n bits remain.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        if n > 64 || n > self.remaining() {
            return None;
        }
        let mut result = 0_u64;
        for _ in 0..n {
            result = result << 1 | u64::from(self.bit()?);
        }
        Some(result)
    }

    /// Convenience wrapper around bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    pub fn is_done(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Debugging function. Report current position as [byte.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.position / 8, self.position % 8)
    }
}

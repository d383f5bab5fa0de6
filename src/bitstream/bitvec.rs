//! BitVec: an exact-length, growable sequence of bits.
//!
//! Bits are packed most significant bit first, so bit 0 of the vector is the
//! high bit (0x80) of the first storage byte. The vector always owns exactly
//! ceil(len / 8) bytes and any unused low bits of the last byte are kept clear.
//!
//! BitVec is what every other part of huffzip trades in: symbol codes, the
//! serialized tree header and the encoded payload are all BitVecs.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::error::{HuffError, Result};

const MASK: u8 = 0b1000_0000;

/// Output style for [`BitVec::to_display_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// Ones and zeros, a space after every 8 bits.
    Binary,
    /// Each storage byte as two hex digits, followed by a space.
    Hex,
}

#[derive(Debug, Clone, Default)]
pub struct BitVec {
    /// Backing storage, ceil(bit_count / 8) bytes.
    bytes: Vec<u8>,
    /// Count of valid bits.
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    /// Create an empty BitVec with room for at least `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            bit_count: 0,
        }
    }

    /// Rebuild a BitVec from stored bytes and the authoritative bit count.
    /// The byte count must be exactly what `bit_count` needs. Stray bits past the
    /// logical end are cleared.
    pub fn from_parts(mut bytes: Vec<u8>, bit_count: usize) -> Result<Self> {
        let needed = bit_count / 8 + usize::from(bit_count % 8 != 0);
        if bytes.len() != needed {
            return Err(HuffError::MalformedContainer(format!(
                "{} bits need {} bytes, found {}",
                bit_count,
                needed,
                bytes.len()
            )));
        }
        let remainder = bit_count % 8;
        if remainder > 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= !(0xff >> remainder);
            }
        }
        Ok(Self { bytes, bit_count })
    }

    /// Count of valid bits.
    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Count of storage bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Backing storage. The last byte may hold fewer than 8 valid bits.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.bit_count = 0;
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;
        if byte_index == self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= MASK >> bit_offset;
        }
        self.bit_count += 1;
    }

    /// Append the low `n` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, n: usize) {
        for pos in (0..n.min(64)).rev() {
            self.push((value >> pos) & 1 == 1);
        }
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Result<bool> {
        if self.bit_count == 0 {
            return Err(HuffError::Index { index: 0, len: 0 });
        }
        self.bit_count -= 1;
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;
        let bit = self.bytes[byte_index] & (MASK >> bit_offset) != 0;
        self.bytes[byte_index] &= !(MASK >> bit_offset);
        // That was the only bit left in the last byte
        if bit_offset == 0 {
            self.bytes.pop();
        }
        Ok(bit)
    }

    /// Read the bit at `index`.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.bit_unchecked(index))
    }

    /// Overwrite the bit at `index`.
    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        self.check(index)?;
        if bit {
            self.bytes[index / 8] |= MASK >> (index % 8);
        } else {
            self.bytes[index / 8] &= !(MASK >> (index % 8));
        }
        Ok(())
    }

    /// Append every bit of `other`, in order.
    pub fn extend_from(&mut self, other: &BitVec) {
        self.bytes.reserve(other.bytes.len());
        for bit in other.iter() {
            self.push(bit);
        }
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            vec: self,
            index: 0,
        }
    }

    pub fn to_display_string(&self, radix: Radix) -> String {
        let mut out = String::with_capacity(self.bit_count + self.bit_count / 8);
        match radix {
            Radix::Hex => {
                for byte in &self.bytes {
                    out.push_str(&format!("{:02x} ", byte));
                }
            }
            Radix::Binary => {
                for (i, bit) in self.iter().enumerate() {
                    out.push(if bit { '1' } else { '0' });
                    if (i + 1) % 8 == 0 && i + 1 < self.bit_count {
                        out.push(' ');
                    }
                }
            }
        }
        out
    }

    #[inline(always)]
    fn bit_unchecked(&self, index: usize) -> bool {
        self.bytes[index / 8] & (MASK >> (index % 8)) != 0
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.bit_count {
            return Err(HuffError::Index {
                index,
                len: self.bit_count,
            });
        }
        Ok(())
    }
}

/// Iterator over the bits of a [`BitVec`].
pub struct Bits<'a> {
    vec: &'a BitVec,
    index: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.index >= self.vec.bit_count {
            return None;
        }
        let bit = self.vec.bit_unchecked(self.index);
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.vec.bit_count - self.index;
        (left, Some(left))
    }
}

impl<'a> IntoIterator for &'a BitVec {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bv = BitVec::new();
        iter.into_iter().for_each(|bit| bv.push(bit));
        bv
    }
}

impl PartialEq for BitVec {
    /// Compare exactly `len` bits: whole bytes first, then the high
    /// `len % 8` bits of the trailing byte.
    fn eq(&self, other: &Self) -> bool {
        if self.bit_count != other.bit_count {
            return false;
        }
        let full_bytes = self.bit_count / 8;
        if self.bytes[..full_bytes] != other.bytes[..full_bytes] {
            return false;
        }
        let remaining_bits = self.bit_count % 8;
        if remaining_bits > 0 {
            let mask = 0xff_u8 << (8 - remaining_bits);
            if self.bytes[full_bytes] & mask != other.bytes[full_bytes] & mask {
                return false;
            }
        }
        true
    }
}

impl Eq for BitVec {}

impl Hash for BitVec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Trailing bits are always clear, so the storage bytes agree with eq.
        self.bit_count.hash(state);
        self.bytes.hash(state);
    }
}

impl Display for BitVec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string(Radix::Binary))
    }
}

#[cfg(test)]
mod test {
    use super::{BitVec, Radix};
    use crate::error::HuffError;
    use rustc_hash::FxHashMap;

    fn bits(s: &str) -> BitVec {
        s.chars().filter(|c| *c != ' ').map(|c| c == '1').collect()
    }

    #[test]
    fn push_test() {
        let mut bv = BitVec::new();
        bv.push(true);
        bv.push(false);
        bv.push(true);
        assert_eq!(bv.len(), 3);
        assert_eq!(bv.as_bytes(), &[0b1010_0000]);
        for _ in 0..6 {
            bv.push(true);
        }
        assert_eq!(bv.len(), 9);
        assert_eq!(bv.as_bytes(), &[0b1011_1111, 0b1000_0000]);
    }

    #[test]
    fn push_bits_test() {
        let mut bv = BitVec::new();
        bv.push(true);
        bv.push_bits(0x41, 8);
        assert_eq!(bv.to_string(), "10100000 1");
    }

    #[test]
    fn pop_test() {
        let mut bv = bits("1000 0000 1");
        assert_eq!(bv.byte_len(), 2);
        assert_eq!(bv.pop().unwrap(), true);
        assert_eq!(bv.byte_len(), 1);
        assert_eq!(bv.len(), 8);
        assert_eq!(bv.pop().unwrap(), false);
        assert_eq!(bv, bits("1000000"));

        let mut empty = BitVec::new();
        assert!(matches!(empty.pop(), Err(HuffError::Index { .. })));
    }

    #[test]
    fn pop_clears_bit_test() {
        let mut bv = bits("11");
        bv.pop().unwrap();
        bv.push(false);
        assert_eq!(bv, bits("10"));
        assert_eq!(bv.as_bytes(), &[0b1000_0000]);
    }

    #[test]
    fn get_set_test() {
        let mut bv = bits("0000 0000 00");
        bv.set(9, true).unwrap();
        bv.set(0, true).unwrap();
        assert!(bv.get(9).unwrap());
        assert!(bv.get(0).unwrap());
        assert!(!bv.get(1).unwrap());
        bv.set(0, false).unwrap();
        assert!(!bv.get(0).unwrap());
        assert!(matches!(
            bv.get(10),
            Err(HuffError::Index { index: 10, len: 10 })
        ));
        assert!(bv.set(10, true).is_err());
    }

    #[test]
    fn extend_test() {
        let mut a = bits("101");
        let b = bits("1111 0000 1");
        a.extend_from(&b);
        assert_eq!(a, bits("1011 1110 0001"));
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn eq_partial_byte_test() {
        // Differ only in the last valid bit of a partial byte
        assert_ne!(bits("1010 1010 101"), bits("1010 1010 100"));
        assert_eq!(bits("1010 1010 101"), bits("1010 1010 101"));
        assert_ne!(bits("1"), bits("10"));
        assert_eq!(BitVec::new(), BitVec::new());
    }

    #[test]
    fn from_parts_test() {
        let bv = BitVec::from_parts(vec![0b1011_1111], 3).unwrap();
        assert_eq!(bv, bits("101"));
        assert_eq!(bv.as_bytes(), &[0b1010_0000]);
        assert!(matches!(
            BitVec::from_parts(vec![0, 0], 8),
            Err(HuffError::MalformedContainer(_))
        ));
        assert!(BitVec::from_parts(vec![], 1).is_err());
        assert!(BitVec::from_parts(vec![], 0).unwrap().is_empty());
    }

    #[test]
    fn hash_key_test() {
        let mut map = FxHashMap::default();
        map.insert(bits("01"), b'a');
        map.insert(bits("010"), b'b');
        map.insert(bits("0"), b'c');
        assert_eq!(map.get(&bits("01")), Some(&b'a'));
        assert_eq!(map.get(&bits("010")), Some(&b'b'));
        let mut probe = bits("011");
        probe.pop().unwrap();
        assert_eq!(map.get(&probe), Some(&b'a'));
    }

    #[test]
    fn display_test() {
        let bv = bits("1111 0000 0000 1111 1");
        assert_eq!(bv.to_display_string(Radix::Binary), "11110000 00001111 1");
        assert_eq!(bv.to_display_string(Radix::Hex), "f0 0f 80 ");
        assert_eq!(BitVec::new().to_display_string(Radix::Binary), "");
    }
}

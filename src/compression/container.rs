//! The on-disk container: a serialized tree section followed by a payload section.
//!
//! Each section is stored as
//!
//! ```text
//! bit_count  : u64, little endian
//! byte_count : u64, little endian
//! bytes      : byte_count bytes
//! ```
//!
//! The bit count is authoritative. The byte count must be exactly
//! ceil(bit_count / 8); it is stored anyway so a reader can size its buffer
//! before touching the bits. Nothing may follow the payload section.

use std::io::{self, Write};

use log::trace;

use crate::bitstream::bitvec::BitVec;
use crate::error::{HuffError, Result};

/// Size of the two count words that open every section.
pub const SECTION_HEADER_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Container {
    /// Serialized Huffman tree.
    pub tree: BitVec,
    /// Encoded data.
    pub payload: BitVec,
}

impl Container {
    pub fn new(tree: BitVec, payload: BitVec) -> Self {
        Self { tree, payload }
    }

    /// Total size of the container in bytes.
    pub fn encoded_len(&self) -> u64 {
        (2 * SECTION_HEADER_LEN + self.tree.byte_len() + self.payload.byte_len()) as u64
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_section(w, &self.tree)?;
        write_section(w, &self.payload)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len() as usize);
        self.write_section_into(&mut out);
        out
    }

    fn write_section_into(&self, out: &mut Vec<u8>) {
        for section in [&self.tree, &self.payload] {
            out.extend_from_slice(&(section.len() as u64).to_le_bytes());
            out.extend_from_slice(&(section.byte_len() as u64).to_le_bytes());
            out.extend_from_slice(section.as_bytes());
        }
    }

    /// Parse a whole container held in memory.
    pub fn parse(data: &[u8]) -> Result<Container> {
        let mut pos = 0;
        let tree = read_section(data, &mut pos, "tree")?;
        let payload = read_section(data, &mut pos, "payload")?;
        if pos != data.len() {
            return Err(HuffError::MalformedContainer(format!(
                "{} unexpected byte(s) after the payload",
                data.len() - pos
            )));
        }
        Ok(Container { tree, payload })
    }
}

fn write_section<W: Write + ?Sized>(w: &mut W, section: &BitVec) -> io::Result<()> {
    w.write_all(&(section.len() as u64).to_le_bytes())?;
    w.write_all(&(section.byte_len() as u64).to_le_bytes())?;
    w.write_all(section.as_bytes())
}

fn read_u64(data: &[u8], pos: &mut usize, what: &str) -> Result<u64> {
    let end = *pos + 8;
    let word = data
        .get(*pos..end)
        .ok_or_else(|| HuffError::MalformedContainer(format!("truncated before the {}", what)))?;
    let mut buf = [0_u8; 8];
    buf.copy_from_slice(word);
    *pos = end;
    Ok(u64::from_le_bytes(buf))
}

fn read_section(data: &[u8], pos: &mut usize, name: &str) -> Result<BitVec> {
    let bit_count = read_u64(data, pos, &format!("{} bit count", name))?;
    let byte_count = read_u64(data, pos, &format!("{} byte count", name))?;
    trace!("{} section: {} bits in {} bytes", name, bit_count, byte_count);

    let needed = bit_count / 8 + u64::from(bit_count % 8 != 0);
    if byte_count != needed {
        return Err(HuffError::MalformedContainer(format!(
            "{} section declares {} bytes for {} bits",
            name, byte_count, bit_count
        )));
    }
    let remaining = (data.len() - *pos) as u64;
    if byte_count > remaining {
        return Err(HuffError::MalformedContainer(format!(
            "{} section declares {} bytes but only {} remain",
            name, byte_count, remaining
        )));
    }
    let (len, bits) = match (usize::try_from(byte_count), usize::try_from(bit_count)) {
        (Ok(len), Ok(bits)) => (len, bits),
        _ => {
            return Err(HuffError::MalformedContainer(format!(
                "{} section size does not fit in memory",
                name
            )))
        }
    };

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len).map_err(|e| {
        HuffError::MalformedContainer(format!("cannot allocate {} bytes for the {}: {}", len, name, e))
    })?;
    bytes.extend_from_slice(&data[*pos..*pos + len]);
    *pos += len;
    BitVec::from_parts(bytes, bits)
}

#[cfg(test)]
mod test {
    use super::Container;
    use crate::bitstream::bitvec::BitVec;
    use crate::error::HuffError;

    fn bits(s: &str) -> BitVec {
        s.chars().filter(|c| *c != ' ').map(|c| c == '1').collect()
    }

    #[test]
    fn layout_test() {
        let c = Container::new(bits("101"), bits("1111 0000 1"));
        let raw = c.to_bytes();
        assert_eq!(raw.len() as u64, c.encoded_len());
        assert_eq!(&raw[0..8], &3_u64.to_le_bytes());
        assert_eq!(&raw[8..16], &1_u64.to_le_bytes());
        assert_eq!(raw[16], 0b1010_0000);
        assert_eq!(&raw[17..25], &9_u64.to_le_bytes());
        assert_eq!(&raw[25..33], &2_u64.to_le_bytes());
        assert_eq!(&raw[33..], &[0b1111_0000, 0b1000_0000]);

        let mut streamed = Vec::new();
        c.write_to(&mut streamed).unwrap();
        assert_eq!(streamed, raw);
        assert_eq!(Container::parse(&raw).unwrap(), c);
    }

    #[test]
    fn empty_test() {
        let c = Container::default();
        let raw = c.to_bytes();
        assert_eq!(raw, vec![0_u8; 32]);
        let back = Container::parse(&raw).unwrap();
        assert!(back.tree.is_empty());
        assert!(back.payload.is_empty());
    }

    #[test]
    fn truncated_test() {
        let raw = Container::new(bits("101"), bits("1111 0000 1")).to_bytes();
        for cut in [1, 2, 9, raw.len() - 20, raw.len()] {
            let short = &raw[..raw.len() - cut];
            assert!(
                matches!(Container::parse(short), Err(HuffError::MalformedContainer(_))),
                "cut {}",
                cut
            );
        }
    }

    #[test]
    fn implausible_sizes_test() {
        // A byte count that does not match the bit count
        let mut raw = Vec::new();
        raw.extend_from_slice(&8_u64.to_le_bytes());
        raw.extend_from_slice(&5_u64.to_le_bytes());
        raw.extend_from_slice(&[0; 5]);
        assert!(matches!(Container::parse(&raw), Err(HuffError::MalformedContainer(_))));

        // Huge but self consistent counts must not be allocated
        let mut raw = Vec::new();
        raw.extend_from_slice(&(u64::MAX - 7).to_le_bytes());
        raw.extend_from_slice(&(u64::MAX / 8).to_le_bytes());
        assert!(matches!(Container::parse(&raw), Err(HuffError::MalformedContainer(_))));
    }

    #[test]
    fn trailing_bytes_test() {
        let mut raw = Container::new(bits("1"), bits("1")).to_bytes();
        raw.push(0);
        assert!(matches!(Container::parse(&raw), Err(HuffError::MalformedContainer(_))));
    }
}

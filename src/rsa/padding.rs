// Block Framing
// Splits a byte stream into sentinel-prefixed blocks whose value stays below n
//
// Block layout (k bytes): 0xFF || payload (up to k-1 bytes)

use super::bigint::{from_bytes, to_bytes, RsaBigInt};
use crate::error::{Result, RsaError};
use std::io::{self, Read};

/// Leading byte of every plaintext block
pub const SENTINEL: u8 = 0xFF;

/// Block capacity k = (bitlength(n) - 1) / 8, so any k-byte value is below n
pub fn block_size(n: &RsaBigInt) -> usize {
    (n.bits().saturating_sub(1) / 8) as usize
}

/// Integer value of a sentinel-prefixed payload
pub fn frame_block(payload: &[u8]) -> RsaBigInt {
    let mut block = Vec::with_capacity(payload.len() + 1);
    block.push(SENTINEL);
    block.extend_from_slice(payload);
    from_bytes(&block)
}

/// Payload of a decrypted block, None if the sentinel is absent
pub fn unframe_block(value: &RsaBigInt) -> Option<Vec<u8>> {
    let bytes = to_bytes(value);
    match bytes.split_first() {
        Some((&SENTINEL, payload)) => Some(payload.to_vec()),
        _ => None,
    }
}

/// Fill `buf` from `reader`, stopping early only at end of input
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Reads plaintext chunks into a reusable k-byte block buffer
#[derive(Debug, Clone)]
pub struct BlockReader {
    block: Vec<u8>,
}

impl BlockReader {
    /// Buffer sized for modulus n; k must leave room for at least one payload byte
    pub fn new(n: &RsaBigInt) -> Result<Self> {
        let k = block_size(n);
        if k < 2 {
            return Err(RsaError::ModulusTooSmall { bits: n.bits() });
        }

        let mut block = vec![0u8; k];
        block[0] = SENTINEL;
        Ok(Self { block })
    }

    /// Block capacity k in bytes, sentinel included
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Payload bytes per full block
    pub fn payload_capacity(&self) -> usize {
        self.block.len() - 1
    }

    /// Next framed block, or None once the input is exhausted
    pub fn next_block<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<Option<&[u8]>> {
        let read = read_full(reader, &mut self.block[1..])?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(&self.block[..read + 1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use num_traits::One;

    #[test]
    fn test_block_size() {
        // 2^16 has 17 bits -> (17 - 1) / 8 = 2
        assert_eq!(block_size(&(RsaBigInt::one() << 16u32)), 2);
        // 0xffff has 16 bits -> 15 / 8 = 1
        assert_eq!(block_size(&from_u64(0xffff)), 1);
        // 1024-bit modulus -> 127 bytes
        assert_eq!(block_size(&(RsaBigInt::one() << 1023u32)), 127);
        assert_eq!(block_size(&from_u64(0)), 0);
    }

    #[test]
    fn test_full_block_below_modulus() {
        // Smallest modulus with a given bit length
        for bits in [17u32, 50, 64, 65, 127, 256] {
            let n = RsaBigInt::one() << (bits - 1);
            let k = block_size(&n);
            let largest = frame_block(&vec![0xFF; k - 1]);
            assert!(largest < n, "{}-bit modulus", bits);
        }
    }

    #[test]
    fn test_frame_block_keeps_leading_zeros() {
        let value = frame_block(&[0x00, 0x00, 0x41]);
        assert_eq!(value, from_u64(0xFF_00_00_41));
        assert_eq!(unframe_block(&value).unwrap(), vec![0x00, 0x00, 0x41]);
    }

    #[test]
    fn test_frame_empty_and_unframe() {
        assert_eq!(frame_block(&[]), from_u64(0xFF));
        assert_eq!(unframe_block(&from_u64(0xFF)).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unframe_without_sentinel() {
        assert!(unframe_block(&from_u64(0x7F_41)).is_none());
        assert!(unframe_block(&from_u64(0)).is_none());
    }

    #[test]
    fn test_block_reader_chunks() {
        let n = RsaBigInt::one() << 40u32; // k = 5
        let mut reader = BlockReader::new(&n).unwrap();
        assert_eq!(reader.capacity(), 5);
        assert_eq!(reader.payload_capacity(), 4);

        let mut input: &[u8] = b"abcdefghij";
        assert_eq!(reader.next_block(&mut input).unwrap().unwrap(), b"\xFFabcd");
        assert_eq!(reader.next_block(&mut input).unwrap().unwrap(), b"\xFFefgh");
        assert_eq!(reader.next_block(&mut input).unwrap().unwrap(), b"\xFFij");
        assert!(reader.next_block(&mut input).unwrap().is_none());
    }

    #[test]
    fn test_block_reader_rejects_tiny_modulus() {
        assert!(matches!(
            BlockReader::new(&from_u64(0xffff)),
            Err(RsaError::ModulusTooSmall { bits: 16 })
        ));
    }

    /// Reader that hands out one byte per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_block_reader_fills_from_short_reads() {
        let n = RsaBigInt::one() << 40u32;
        let mut reader = BlockReader::new(&n).unwrap();
        let mut input = Trickle(b"abcdef");
        assert_eq!(reader.next_block(&mut input).unwrap().unwrap(), b"\xFFabcd");
        assert_eq!(reader.next_block(&mut input).unwrap().unwrap(), b"\xFFef");
        assert!(reader.next_block(&mut input).unwrap().is_none());
    }
}

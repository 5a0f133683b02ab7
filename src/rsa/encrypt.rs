// RSA Encryption Implementation
// Block-wise encryption of a byte stream into hexadecimal ciphertext lines

use super::bigint::{from_bytes, mod_pow, to_hex, RsaBigInt};
use super::keygen::RsaPublicKey;
use super::padding::BlockReader;
use crate::error::Result;
use num_traits::{One, Zero};
use std::io::{Read, Write};

/// Encrypt one block integer: c = m^e mod n
/// Returns None for 0 and 1, which every exponent maps to themselves
pub fn encrypt_block(m: &RsaBigInt, e: &RsaBigInt, n: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() || m.is_one() {
        return None;
    }
    Some(mod_pow(m, e, n))
}

/// Outcome of an encrypted stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncryptSummary {
    pub blocks: usize,
    pub skipped: usize,
    pub bytes: u64,
}

/// Encrypt `input` under `public_key`, writing one hex line per block to `output`
pub fn encrypt_stream<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    public_key: &RsaPublicKey,
) -> Result<EncryptSummary> {
    let mut reader = BlockReader::new(&public_key.n)?;
    let mut summary = EncryptSummary::default();
    log::debug!(
        "encrypting with {}-byte blocks ({} payload bytes)",
        reader.capacity(),
        reader.payload_capacity()
    );

    let mut index = 0usize;
    while let Some(block) = reader.next_block(&mut input)? {
        index += 1;
        log::trace!("block {}: {}", index, hex::encode(block));

        let m = from_bytes(block);
        match encrypt_block(&m, &public_key.e, &public_key.n) {
            Some(c) => {
                writeln!(output, "{}", to_hex(&c))?;
                summary.blocks += 1;
                summary.bytes += (block.len() - 1) as u64;
            }
            None => {
                log::warn!("cannot encrypt block {} that has value of 0 or 1", index);
                summary.skipped += 1;
            }
        }
    }

    output.flush()?;
    log::debug!(
        "encrypted {} bytes into {} blocks",
        summary.bytes,
        summary.blocks
    );
    Ok(summary)
}

/// Encrypt bytes in memory, returning the ciphertext text
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    let mut ciphertext = Vec::new();
    encrypt_stream(plaintext, &mut ciphertext, public_key)?;
    Ok(ciphertext)
}

impl RsaPublicKey {
    /// Encrypt a message using this public key
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        encrypt_bytes(plaintext, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{from_u64, parse_hex};
    use crate::rsa::keygen::generate_keypair;
    use crate::rsa::randstate::rand_state;

    #[test]
    fn test_encrypt_block() {
        // n = 3233, e = 17: 65^17 mod 3233 = 2790
        let c = encrypt_block(&from_u64(65), &from_u64(17), &from_u64(3233)).unwrap();
        assert_eq!(c, from_u64(2790));
    }

    #[test]
    fn test_encrypt_block_rejects_fixed_points() {
        assert!(encrypt_block(&from_u64(0), &from_u64(17), &from_u64(3233)).is_none());
        assert!(encrypt_block(&from_u64(1), &from_u64(17), &from_u64(3233)).is_none());
    }

    #[test]
    fn test_encrypt_stream_line_per_block() {
        let mut rng = rand_state(31);
        let keypair = generate_keypair(128, 20, "alice", &mut rng).unwrap();
        let key = &keypair.public_key;
        let payload = key.block_size() - 1;

        let message = vec![0x5a_u8; payload * 2 + 3];
        let mut out = Vec::new();
        let summary = encrypt_stream(message.as_slice(), &mut out, key).unwrap();
        assert_eq!(summary.blocks, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.bytes, message.len() as u64);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let c = parse_hex(line, "ciphertext").unwrap();
            assert!(c < key.n);
        }
    }

    #[test]
    fn test_encrypt_empty_input() {
        let mut rng = rand_state(32);
        let keypair = generate_keypair(128, 20, "alice", &mut rng).unwrap();
        let ciphertext = keypair.public_key.encrypt(b"").unwrap();
        assert!(ciphertext.is_empty());
    }

    #[test]
    fn test_encrypt_is_deterministic_per_key() {
        let mut rng = rand_state(33);
        let keypair = generate_keypair(128, 20, "alice", &mut rng).unwrap();
        let a = keypair.public_key.encrypt(b"Hello, RSA!").unwrap();
        let b = keypair.public_key.encrypt(b"Hello, RSA!").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, b"Hello, RSA!".to_vec());
    }
}

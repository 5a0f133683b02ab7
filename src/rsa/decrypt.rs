// RSA Decryption Implementation
// Reads hexadecimal ciphertext lines and restores the framed plaintext bytes

use super::bigint::{mod_pow, parse_hex, RsaBigInt};
use super::keygen::RsaPrivateKey;
use super::padding::unframe_block;
use crate::error::{Result, RsaError};
use std::io::{BufRead, Write};

/// Decrypt one block integer: m = c^d mod n
pub fn decrypt_block(c: &RsaBigInt, d: &RsaBigInt, n: &RsaBigInt) -> RsaBigInt {
    mod_pow(c, d, n)
}

/// Decrypt hex lines from `input` under `private_key`, writing plaintext to `output`
/// Returns the number of plaintext bytes written
pub fn decrypt_stream<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    private_key: &RsaPrivateKey,
) -> Result<u64> {
    let mut written = 0u64;
    let mut raw = Vec::new();
    let mut number = 0usize;

    // Raw bytes per line; non-UTF-8 content is reported as bad hex
    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        number += 1;
        let line = String::from_utf8_lossy(&raw);
        if line.trim().is_empty() {
            continue;
        }

        let c = parse_hex(&line, &format!("ciphertext on line {}", number))?;
        if c >= private_key.n {
            return Err(RsaError::CiphertextOutOfRange { line: number });
        }

        let m = decrypt_block(&c, &private_key.d, &private_key.n);
        let payload = unframe_block(&m).ok_or(RsaError::MissingSentinel { line: number })?;
        log::trace!("line {}: {}", number, hex::encode(&payload));

        output.write_all(&payload)?;
        written += payload.len() as u64;
    }

    output.flush()?;
    log::debug!("decrypted {} bytes", written);
    Ok(written)
}

/// Decrypt ciphertext text in memory
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let mut plaintext = Vec::new();
    decrypt_stream(ciphertext, &mut plaintext, private_key)?;
    Ok(plaintext)
}

impl RsaPrivateKey {
    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt_bytes(ciphertext, self)
    }
}

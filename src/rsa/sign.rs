// RSA Signatures
// Signing and verification of integer messages, used to bind an identity to a public key

use super::bigint::{from_bytes, mod_pow, RsaBigInt};
use super::keygen::RsaPublicKey;
use crate::error::{Result, RsaError};

/// signature = message^d mod n
pub fn sign(message: &RsaBigInt, d: &RsaBigInt, n: &RsaBigInt) -> RsaBigInt {
    mod_pow(message, d, n)
}

/// True iff signature^e mod n == message
pub fn verify(message: &RsaBigInt, signature: &RsaBigInt, e: &RsaBigInt, n: &RsaBigInt) -> bool {
    mod_pow(signature, e, n) == *message
}

fn base62_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'a'..=b'z' => Some(c - b'a' + 36),
        _ => None,
    }
}

/// Integer form of an identity string
///
/// Alphanumeric identities are read as base-62 numerals (`0-9`, `A-Z`, `a-z`).
/// Anything else is taken as the big-endian value of its UTF-8 bytes.
pub fn identity_to_int(identity: &str) -> RsaBigInt {
    let digits: Option<Vec<u8>> = identity.bytes().map(base62_digit).collect();

    match digits {
        Some(digits) if !digits.is_empty() => digits
            .into_iter()
            .fold(RsaBigInt::from(0u8), |acc, digit| acc * 62u8 + digit),
        _ => from_bytes(identity.as_bytes()),
    }
}

impl RsaPublicKey {
    /// Check the embedded signature against the embedded identity
    pub fn verify_identity(&self) -> Result<()> {
        let message = identity_to_int(&self.identity) % &self.n;

        if verify(&message, &self.signature, &self.e, &self.n) {
            Ok(())
        } else {
            Err(RsaError::SignatureMismatch {
                identity: self.identity.clone(),
            })
        }
    }
}

//! Error types for the RSA tool

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RsaError>;

#[derive(Error, Debug)]
pub enum RsaError {
    #[error("number of bits must be within {min}-{max}, inclusive (got {bits})")]
    InvalidBitLength { bits: u64, min: u64, max: u64 },

    #[error("number of iterations must be within {min}-{max}, inclusive (got {iters})")]
    InvalidIterations { iters: u32, min: u32, max: u32 },

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("cannot search for a {0}-bit prime")]
    InvalidPrimeBits(u64),

    #[error("failed to find a {bits}-bit prime after {attempts} candidates")]
    PrimeSearchExhausted { bits: u64, attempts: u64 },

    #[error("failed to find a public exponent coprime to lambda(n) after {attempts} draws")]
    ExponentSearchExhausted { attempts: u64 },

    #[error("modulus of {bits} bits is too small to carry a payload byte")]
    ModulusTooSmall { bits: u64 },

    #[error("{key} key is missing the `{field}` field")]
    MissingField { key: &'static str, field: &'static str },

    #[error("invalid hexadecimal {context}: `{value}`")]
    InvalidHex { context: String, value: String },

    #[error("ciphertext on line {line} is not smaller than the modulus")]
    CiphertextOutOfRange { line: usize },

    #[error("decrypted block on line {line} does not start with the sentinel byte")]
    MissingSentinel { line: usize },

    #[error("could not verify signature for identity `{identity}`")]
    SignatureMismatch { identity: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Tool Configuration
// Validated settings for keygen, encrypt and decrypt

use crate::error::{Result, RsaError};
use crate::rsa::randstate::time_seed;
use std::path::PathBuf;

pub const MIN_BITS: u64 = 50;
pub const MAX_BITS: u64 = 4096;
pub const DEFAULT_BITS: u64 = 1024;

pub const MIN_ITERS: u32 = 1;
pub const MAX_ITERS: u32 = 500;
pub const DEFAULT_ITERS: u32 = 50;

pub const DEFAULT_PUBLIC_KEY: &str = "rsa.pub";
pub const DEFAULT_PRIVATE_KEY: &str = "rsa.priv";

/// Reject modulus sizes outside 50..=4096
pub fn check_bits(bits: u64) -> Result<()> {
    if !(MIN_BITS..=MAX_BITS).contains(&bits) {
        return Err(RsaError::InvalidBitLength {
            bits,
            min: MIN_BITS,
            max: MAX_BITS,
        });
    }
    Ok(())
}

/// Reject Miller-Rabin round counts outside 1..=500
pub fn check_iters(iters: u32) -> Result<()> {
    if !(MIN_ITERS..=MAX_ITERS).contains(&iters) {
        return Err(RsaError::InvalidIterations {
            iters,
            min: MIN_ITERS,
            max: MAX_ITERS,
        });
    }
    Ok(())
}

/// The identity occupies one line of the public key file
pub fn check_identity(identity: &str) -> Result<()> {
    if identity.is_empty() {
        return Err(RsaError::InvalidIdentity("identity is empty".to_string()));
    }
    if identity.contains(['\n', '\r']) {
        return Err(RsaError::InvalidIdentity(
            "identity must fit on a single line".to_string(),
        ));
    }
    Ok(())
}

/// Configuration for key generation
#[derive(Clone, Debug)]
pub struct KeygenConfig {
    pub bits: u64,
    pub iters: u32,
    pub public_key: PathBuf,
    pub private_key: PathBuf,
    pub seed: u64,
    pub identity: String,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            iters: DEFAULT_ITERS,
            public_key: PathBuf::from(DEFAULT_PUBLIC_KEY),
            private_key: PathBuf::from(DEFAULT_PRIVATE_KEY),
            seed: time_seed(),
            identity: String::new(),
        }
    }
}

impl KeygenConfig {
    pub fn with_bits(mut self, bits: u64) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_iters(mut self, iters: u32) -> Self {
        self.iters = iters;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_key_files(mut self, public_key: PathBuf, private_key: PathBuf) -> Self {
        self.public_key = public_key;
        self.private_key = private_key;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_bits(self.bits)?;
        check_iters(self.iters)?;
        check_identity(&self.identity)
    }
}

/// Configuration for encrypt and decrypt; `None` streams mean stdin/stdout
#[derive(Clone, Debug)]
pub struct StreamConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub key: PathBuf,
}

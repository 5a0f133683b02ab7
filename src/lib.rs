//! # RSA Tool
//!
//! RSA key generation, encryption, decryption and identity signatures built
//! from first principles on `num-bigint`.
//!
//! - Number theory: gcd, modular inverse, square-and-multiply, Miller-Rabin
//! - Keys use Carmichael's function lambda(n) = lcm(p-1, q-1)
//! - Plaintext is framed into `0xFF`-prefixed blocks, ciphertext is one hex line per block
//!
//! ## Example
//!
//! ```rust
//! use rsa_tool::rsa::{generate_keypair, rand_state};
//!
//! let mut rng = rand_state(7);
//! let keypair = generate_keypair(256, 20, "alice", &mut rng).unwrap();
//! keypair.public_key.verify_identity().unwrap();
//!
//! let ciphertext = keypair.public_key.encrypt(b"attack at dawn").unwrap();
//! let plaintext = keypair.private_key.decrypt(&ciphertext).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```

pub mod config;
pub mod error;
pub mod rsa;
pub mod util;

pub use config::{KeygenConfig, StreamConfig};
pub use error::{Result, RsaError};
pub use rsa::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

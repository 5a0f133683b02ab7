// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keyfile;
pub mod keygen;
pub mod padding;
pub mod randstate;
pub mod sign;

pub use bigint::{gcd, is_probable_prime, mod_inverse, mod_pow, random_prime, RsaBigInt};
pub use decrypt::{decrypt_block, decrypt_bytes, decrypt_stream};
pub use encrypt::{encrypt_block, encrypt_bytes, encrypt_stream, EncryptSummary};
pub use keyfile::{read_private_key, read_public_key, write_private_key, write_public_key};
pub use keygen::{
    generate_keypair, make_private_key, make_public_key, PublicKeyParts, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey,
};
pub use padding::{block_size, BlockReader, SENTINEL};
pub use randstate::{rand_state, RandState};
pub use sign::{identity_to_int, sign, verify};

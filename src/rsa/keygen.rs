// RSA Key Generation
// Derives (p, q, n, e) and d using Carmichael's function

use super::bigint::{
    gcd, lcm, mod_inverse, random_exact_bits, random_prime, RsaBigInt,
};
use super::padding::block_size;
use super::sign::{identity_to_int, sign};
use crate::config::{check_bits, check_identity, check_iters};
use crate::error::{Result, RsaError};
use num_traits::One;
use rand::Rng;

/// Upper bound on public exponent draws before giving up
pub const MAX_EXPONENT_ATTEMPTS: u64 = 1_000_000;

/// RSA Public Key, as stored in the public key file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt,         // Modulus
    pub e: RsaBigInt,         // Public exponent
    pub signature: RsaBigInt, // Identity signed with d
    pub identity: String,
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// Output of public key derivation, before the primes are discarded
#[derive(Debug, Clone)]
pub struct PublicKeyParts {
    pub p: RsaBigInt,
    pub q: RsaBigInt,
    pub n: RsaBigInt,
    pub e: RsaBigInt,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub p: RsaBigInt,
    pub q: RsaBigInt,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Plaintext block capacity in bytes, sentinel included
    pub fn block_size(&self) -> usize {
        block_size(&self.n)
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Sign an integer message with this key
    pub fn sign(&self, message: &RsaBigInt) -> RsaBigInt {
        sign(message, &self.d, &self.n)
    }
}

impl RsaKeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Carmichael's function for n = p*q: lcm(p-1, q-1)
pub fn carmichael(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    lcm(&(p - 1u8), &(q - 1u8))
}

/// Generate p, q, n and a public exponent e coprime to lambda(n)
/// total_bits: target size of the modulus, split unevenly between p and q
pub fn make_public_key<R: Rng + ?Sized>(
    total_bits: u64,
    iterations: u32,
    rng: &mut R,
) -> Result<PublicKeyParts> {
    check_bits(total_bits)?;
    check_iters(iterations)?;

    // Step 1: pbits uniform over [bits/4, 3*bits/4)
    let lower = total_bits / 4;
    let upper = (3 * total_bits) / 4;
    let pbits = rng.gen_range(lower..upper);
    let qbits = total_bits - pbits;

    // Step 2: two distinct primes
    let p = random_prime(pbits, iterations, rng)?;
    let mut q = random_prime(qbits, iterations, rng)?;
    while q == p {
        q = random_prime(qbits, iterations, rng)?;
    }

    // Step 3: n and lambda(n)
    let n = &p * &q;
    let lambda = carmichael(&p, &q);

    // Step 4: e with exactly total_bits bits, coprime to lambda(n)
    for _ in 0..MAX_EXPONENT_ATTEMPTS {
        let e = random_exact_bits(total_bits, rng);
        if gcd(&e, &lambda).is_one() {
            log::debug!(
                "public key: p {} bits, q {} bits, n {} bits",
                p.bits(),
                q.bits(),
                n.bits()
            );
            return Ok(PublicKeyParts { p, q, n, e });
        }
    }

    Err(RsaError::ExponentSearchExhausted {
        attempts: MAX_EXPONENT_ATTEMPTS,
    })
}

/// Private exponent d = e^(-1) mod lambda(n)
///
/// # Panics
///
/// Panics if `e` is not coprime to lambda(n); `make_public_key` never yields such an `e`.
pub fn make_private_key(e: &RsaBigInt, p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    let lambda = carmichael(p, q);
    mod_inverse(e, &lambda).expect("public exponent must be coprime to lambda(n)")
}

/// Generate RSA key pair with a signed identity
/// bit_length: Size of the modulus in bits (50 - 4096)
/// iterations: Miller-Rabin rounds per prime candidate
pub fn generate_keypair<R: Rng + ?Sized>(
    bit_length: u64,
    iterations: u32,
    identity: &str,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    check_identity(identity)?;

    let PublicKeyParts { p, q, n, e } = make_public_key(bit_length, iterations, rng)?;
    let d = make_private_key(&e, &p, &q);

    let message = identity_to_int(identity) % &n;
    let signature = sign(&message, &d, &n);

    let public_key = RsaPublicKey {
        n: n.clone(),
        e,
        signature,
        identity: identity.to_string(),
    };
    let private_key = RsaPrivateKey { n, d };

    Ok(RsaKeyPair {
        public_key,
        private_key,
        p,
        q,
    })
}

// RSA Big Integer Operations
// Number theory over num-bigint: gcd, inverse, pow-mod, primality and prime search

use crate::config::check_iters;
use crate::error::{Result, RsaError};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Upper bound on candidates drawn by `random_prime` before giving up
pub const MAX_PRIME_ATTEMPTS: u64 = 1_000_000;

/// Largest odd divisor tried before running Miller-Rabin
const TRIAL_DIVISION_LIMIT: u32 = 541;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Lowercase hexadecimal, no prefix
pub fn to_hex(n: &RsaBigInt) -> String {
    n.to_str_radix(16)
}

/// Parse an unsigned hexadecimal magnitude without prefix
pub fn parse_hex(text: &str, context: &str) -> Result<RsaBigInt> {
    let digits = text.trim();
    let invalid = || RsaError::InvalidHex {
        context: context.to_string(),
        value: digits.to_string(),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    RsaBigInt::parse_bytes(digits.as_bytes(), 16).ok_or_else(invalid)
}

/// Greatest common divisor (Euclid)
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let rem = &a % &b;
        a = std::mem::replace(&mut b, rem);
    }

    a
}

/// Least common multiple
pub fn lcm(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    if a.is_zero() || b.is_zero() {
        return RsaBigInt::zero();
    }
    (a * b) / gcd(a, b)
}

/// Compute modular inverse: a^(-1) mod n
/// Returns None if a and n are not coprime
pub fn mod_inverse(a: &RsaBigInt, n: &RsaBigInt) -> Option<RsaBigInt> {
    let modulus = BigInt::from(n.clone());

    let mut r = modulus.clone();
    let mut r_next = BigInt::from(a.clone());
    let mut t = BigInt::zero();
    let mut t_next = BigInt::one();

    while !r_next.is_zero() {
        let q = r.div_floor(&r_next);

        let r_new = &r - &q * &r_next;
        r = std::mem::replace(&mut r_next, r_new);

        let t_new = &t - &q * &t_next;
        t = std::mem::replace(&mut t_next, t_new);
    }

    // r holds gcd(a, n)
    if !r.is_one() {
        return None;
    }

    if t.is_negative() {
        t += &modulus;
    }

    t.to_biguint()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    assert!(!modulus.is_zero(), "mod_pow called with a zero modulus");

    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime after `iterations` random witnesses;
/// zero rounds run as one
pub fn is_probable_prime<R: Rng + ?Sized>(n: &RsaBigInt, iterations: u32, rng: &mut R) -> bool {
    let two = from_u64(2);

    if n < &two {
        return false;
    }
    if n == &two || n == &from_u64(3) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as r * 2^s with r odd
    let n_minus_one = n - 1u8;
    let mut r = n_minus_one.clone();
    let mut s = 0u64;
    while r.is_even() {
        r >>= 1;
        s += 1;
    }

    for _ in 0..iterations.max(1) {
        // Witness in [2, n-2]
        let witness = rng.gen_biguint_range(&two, &n_minus_one);

        let mut y = mod_pow(&witness, &r, n);
        if y.is_one() || y == n_minus_one {
            continue;
        }

        let mut j = 1;
        while j < s && y != n_minus_one {
            y = mod_pow(&y, &two, n);
            if y.is_one() {
                return false;
            }
            j += 1;
        }

        if y != n_minus_one {
            return false;
        }
    }

    // Probably prime
    true
}

/// Uniformly random integer with exactly `bits` bits
pub fn random_exact_bits<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> RsaBigInt {
    if bits == 0 {
        return RsaBigInt::zero();
    }

    let mut candidate = rng.gen_biguint(bits);
    candidate |= RsaBigInt::one() << (bits - 1);
    candidate
}

/// True if some odd number in 3..=541 other than n itself divides n
fn has_small_factor(n: &RsaBigInt) -> bool {
    (3..=TRIAL_DIVISION_LIMIT)
        .step_by(2)
        .any(|i| (n % i).is_zero() && *n != RsaBigInt::from(i))
}

/// Generate a random prime of specified bit length
pub fn random_prime<R: Rng + ?Sized>(
    bit_length: u64,
    iterations: u32,
    rng: &mut R,
) -> Result<RsaBigInt> {
    if bit_length < 2 {
        return Err(RsaError::InvalidPrimeBits(bit_length));
    }
    check_iters(iterations)?;

    for attempt in 1..=MAX_PRIME_ATTEMPTS {
        let mut candidate = random_exact_bits(bit_length, rng);

        // Make it odd
        if candidate.is_even() {
            candidate += 1u8;
        }

        // Cheap filter before the probabilistic test
        if has_small_factor(&candidate) {
            continue;
        }

        if is_probable_prime(&candidate, iterations, rng) {
            log::debug!("found {}-bit prime after {} candidates", bit_length, attempt);
            return Ok(candidate);
        }
    }

    Err(RsaError::PrimeSearchExhausted {
        bits: bit_length,
        attempts: MAX_PRIME_ATTEMPTS,
    })
}

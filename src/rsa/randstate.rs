// RSA Random State
// Seeded generator threaded explicitly through prime and exponent search

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generator used for key generation and Miller-Rabin witnesses
pub type RandState = StdRng;

/// Create a generator from a fixed seed
pub fn rand_state(seed: u64) -> RandState {
    StdRng::seed_from_u64(seed)
}

/// Seconds since the Unix epoch, the default keygen seed
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

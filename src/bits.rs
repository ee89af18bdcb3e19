//! Random bit sources
//!
//! Every stream is a seeded `ChaCha8Rng`, so a seed fully determines the
//! bits it produces.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` independent equiprobable bits (0 or 1) from `seed`.
pub fn generate_bits(count: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_bits_with(&mut rng, count)
}

/// Generate `count` bits from a caller-owned stream, advancing it.
pub fn generate_bits_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u8> {
    (0..count).map(|_| rng.gen::<bool>() as u8).collect()
}

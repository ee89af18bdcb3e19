//! Complex additive white Gaussian noise generator
//!
//! Draws independent N(0, σ²) samples for the real and imaginary parts from
//! its own `ChaCha8Rng`, seeded from a parent stream.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// AWGN generator with configurable per-component variance
pub struct NoiseGenerator {
    /// Standard deviation of each of I and Q
    std_dev: f64,

    rng: ChaCha8Rng,
}

impl NoiseGenerator {
    /// Create a generator whose complex samples have total power `noise_power`,
    /// split equally between I and Q.
    pub fn new<R: Rng + ?Sized>(noise_power: f64, seed_rng: &mut R) -> Self {
        let std_dev = (noise_power / 2.0).max(0.0).sqrt();

        // Own stream, keyed off the parent
        let rng = ChaCha8Rng::seed_from_u64(seed_rng.gen());
        Self { std_dev, rng }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Generate the next complex noise sample
    pub fn next_sample(&mut self) -> Complex64 {
        let re: f64 = self.rng.sample(StandardNormal);
        let im: f64 = self.rng.sample(StandardNormal);
        Complex64::new(re * self.std_dev, im * self.std_dev)
    }
}

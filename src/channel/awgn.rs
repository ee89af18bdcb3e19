//! AWGN channel
//!
//! Measures the average power of the transmitted samples, derives the noise
//! power for the target SNR and adds independent complex Gaussian noise to
//! every sample. The input is never modified; a new waveform is returned.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::noise::NoiseGenerator;
use super::params::{ChannelParameters, PowerReference};
use crate::error::{OfdmError, Result};
use crate::utils::mean_power;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwgnChannel {
    snr_db: f64,
    power_reference: PowerReference,
}

impl AwgnChannel {
    /// Create a channel for a target SNR in dB, measured over all samples.
    pub fn new(snr_db: f64) -> Result<Self> {
        if !snr_db.is_finite() {
            return Err(OfdmError::InvalidConfig(format!("SNR must be finite, got {}", snr_db)));
        }
        Ok(Self {
            snr_db,
            power_reference: PowerReference::IncludePrefix,
        })
    }

    pub fn with_power_reference(mut self, power_reference: PowerReference) -> Self {
        self.power_reference = power_reference;
        self
    }

    pub fn snr_db(&self) -> f64 {
        self.snr_db
    }

    pub fn power_reference(&self) -> PowerReference {
        self.power_reference
    }

    /// Signal power of `samples` under the configured reference
    pub fn signal_power(&self, samples: &[Complex64]) -> Result<f64> {
        match self.power_reference {
            PowerReference::IncludePrefix => Ok(mean_power(samples)),
            PowerReference::ExcludePrefix { fft_size, cp_len } => {
                if fft_size == 0 || cp_len >= fft_size {
                    return Err(OfdmError::InvalidFrameParameters { fft_size, cp_len });
                }
                let frame_len = fft_size + cp_len;
                if samples.len() % frame_len != 0 {
                    return Err(OfdmError::InvalidInputLength {
                        actual: samples.len(),
                        multiple_of: frame_len,
                    });
                }
                let frames = samples.len() / frame_len;
                if frames == 0 {
                    return Ok(0.0);
                }
                let energy: f64 = samples
                    .chunks_exact(frame_len)
                    .flat_map(|frame| frame[cp_len..].iter())
                    .map(|s| s.norm_sqr())
                    .sum();
                Ok(energy / (frames * fft_size) as f64)
            }
        }
    }

    /// Noise parameters this channel would use for `samples`
    pub fn parameters(&self, samples: &[Complex64]) -> Result<ChannelParameters> {
        Ok(ChannelParameters::derive(self.signal_power(samples)?, self.snr_db))
    }

    /// Add noise drawn from a stream seeded off `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, samples: &[Complex64], rng: &mut R) -> Result<Vec<Complex64>> {
        let params = self.parameters(samples)?;
        let mut noise = NoiseGenerator::new(params.noise_power, rng);

        Ok(samples.iter().map(|&s| s + noise.next_sample()).collect())
    }
}

/// Pass `samples` through an AWGN channel at `snr_db`, noise seeded from `seed`.
pub fn apply_channel(samples: &[Complex64], snr_db: f64, seed: u64) -> Result<Vec<Complex64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    AwgnChannel::new(snr_db)?.apply(samples, &mut rng)
}

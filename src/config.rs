//! Simulation configuration
//!
//! Plain immutable values handed to the runner. Deserializable so an
//! orchestrator can load them from whatever format it prefers; the core never
//! reads files itself.
//!
//! ```json
//! {
//!   "fft_size": 64,
//!   "cp_len": 16,
//!   "modulation": "16QAM",
//!   "symbols_per_trial": 100,
//!   "trials": 50,
//!   "snr_sweep": { "start_db": 0.0, "stop_db": 20.0, "step_db": 2.0 },
//!   "seed": 7
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::channel::PowerReference;
use crate::error::{OfdmError, Result};
use crate::modem::Modulation;
use crate::traits::Constellation;

/// Upper bound on the number of points in one sweep
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// SNR points visited by a sweep, in dB.
///
/// `stop_db` is included when the grid lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnrSweep {
    pub start_db: f64,
    pub stop_db: f64,
    pub step_db: f64,
}

impl Default for SnrSweep {
    fn default() -> Self {
        Self { start_db: 0.0, stop_db: 20.0, step_db: 2.0 }
    }
}

impl SnrSweep {
    /// A sweep with a single point
    pub fn single(snr_db: f64) -> Self {
        Self { start_db: snr_db, stop_db: snr_db, step_db: 1.0 }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.start_db.is_finite() && self.stop_db.is_finite()) {
            return Err(OfdmError::InvalidConfig("SNR sweep bounds must be finite".into()));
        }
        if !(self.step_db.is_finite() && self.step_db > 0.0) {
            return Err(OfdmError::InvalidConfig(format!(
                "SNR sweep step must be positive, got {}",
                self.step_db
            )));
        }
        if self.stop_db < self.start_db {
            return Err(OfdmError::InvalidConfig(format!(
                "SNR sweep stop {} dB is below start {} dB",
                self.stop_db, self.start_db
            )));
        }
        if self.point_count().is_none() {
            return Err(OfdmError::InvalidConfig(format!(
                "SNR sweep {}..{} dB in {} dB steps exceeds {} points",
                self.start_db, self.stop_db, self.step_db, MAX_SWEEP_POINTS
            )));
        }
        Ok(())
    }

    /// Number of grid points, or `None` past [`MAX_SWEEP_POINTS`]
    fn point_count(&self) -> Option<usize> {
        // Tolerance keeps an exact stop from being lost to rounding
        let steps = ((self.stop_db - self.start_db) / self.step_db + 1e-9).floor();
        if !steps.is_finite() || steps < 0.0 || steps >= MAX_SWEEP_POINTS as f64 {
            return None;
        }
        Some(steps as usize + 1)
    }

    /// Grid points `start + k * step` up to and including `stop`.
    ///
    /// Empty when the sweep does not validate.
    pub fn points(&self) -> Vec<f64> {
        if self.validate().is_err() {
            return Vec::new();
        }
        let count = self.point_count().unwrap_or(0);
        (0..count).map(|k| self.start_db + k as f64 * self.step_db).collect()
    }
}

/// Parameters of one BER run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// FFT size N (number of subcarriers)
    pub fft_size: usize,
    /// Cyclic prefix length, 0 < cp_len < fft_size
    pub cp_len: usize,
    pub modulation: Modulation,
    /// OFDM symbols per Monte-Carlo trial
    pub symbols_per_trial: usize,
    /// Monte-Carlo trials per SNR point
    pub trials: usize,
    pub snr_sweep: SnrSweep,
    /// Top-level seed; fixes every bit and noise sample of the run
    pub seed: u64,
    pub power_reference: PowerReference,
    /// Run trials on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fft_size: 64,
            cp_len: 16,
            modulation: Modulation::Qpsk,
            symbols_per_trial: 5000,
            trials: 50,
            snr_sweep: SnrSweep::default(),
            seed: 0,
            power_reference: PowerReference::IncludePrefix,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fft_size == 0 || self.cp_len == 0 || self.cp_len >= self.fft_size {
            return Err(OfdmError::InvalidFrameParameters {
                fft_size: self.fft_size,
                cp_len: self.cp_len,
            });
        }
        if self.symbols_per_trial == 0 {
            return Err(OfdmError::InvalidConfig("symbols_per_trial must be at least 1".into()));
        }
        if self.trials == 0 {
            return Err(OfdmError::InvalidConfig("trials must be at least 1".into()));
        }
        if self.checked_bits_per_trial().is_none() {
            return Err(OfdmError::InvalidConfig(format!(
                "{} symbols of {} subcarriers per trial overflows the bit count",
                self.symbols_per_trial, self.fft_size
            )));
        }
        self.snr_sweep.validate()
    }

    /// Bits carried by one OFDM symbol (bits per point × N)
    pub fn bits_per_ofdm_symbol(&self) -> usize {
        self.modulation.bits_per_symbol().saturating_mul(self.fft_size)
    }

    /// Bits generated for one trial. Saturates on configs that fail `validate()`.
    pub fn bits_per_trial(&self) -> usize {
        self.checked_bits_per_trial().unwrap_or(usize::MAX)
    }

    fn checked_bits_per_trial(&self) -> Option<usize> {
        self.modulation
            .bits_per_symbol()
            .checked_mul(self.fft_size)?
            .checked_mul(self.symbols_per_trial)
    }
}

//! Monte-Carlo BER runner
//!
//! Thin orchestration over the core stages:
//! bits → map → frame → AWGN → unframe → demap → BER.
//!
//! Every trial owns a `ChaCha8Rng` seeded from `(config.seed, point, trial)`,
//! so trials share no state and a run gives identical numbers whether trials
//! execute sequentially or on the rayon pool. Results are collected in trial
//! order before aggregation.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::ber::{compute_ber, BerResult, BerStats};
use crate::bits::generate_bits_with;
use crate::channel::{AwgnChannel, PowerReference};
use crate::config::SimulationConfig;
use crate::error::{OfdmError, Result};
use crate::modem::{demap, map, Modulation};
use crate::ofdm::OfdmFramer;

/// Everything one trial produced
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub seed: u64,
    pub snr_db: f64,
    pub tx_bits: Vec<u8>,
    /// Waveform after the channel, `symbols_per_trial` frames back to back
    pub rx_waveform: Vec<Complex64>,
    pub rx_bits: Vec<u8>,
    pub ber: BerResult,
}

/// BER statistics at one SNR
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerPoint {
    pub snr_db: f64,
    pub stats: BerStats,
}

/// BER versus SNR for one scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerCurve {
    pub modulation: Modulation,
    pub points: Vec<BerPoint>,
}

impl BerCurve {
    /// Mean BER measured at `snr_db`, if that point was simulated
    pub fn ber_at(&self, snr_db: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| (p.snr_db - snr_db).abs() < 1e-9)
            .map(|p| p.stats.mean)
    }

    pub fn snr_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.snr_db).collect()
    }

    pub fn mean_bers(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.stats.mean).collect()
    }
}

/// Seed of trial `trial` at sweep point `point` of a run seeded with `base`.
///
/// The point selects a ChaCha stream of the base key and the trial a
/// two-word slot within it, so no two (point, trial) pairs share output.
pub fn trial_seed(base: u64, point: usize, trial: usize) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(base);
    rng.set_stream(point as u64);
    rng.set_word_pos(trial as u128 * 2);
    rng.gen()
}

/// Runs trials, SNR points and sweeps for one immutable configuration
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    framer: OfdmFramer,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if let PowerReference::ExcludePrefix { fft_size, cp_len } = config.power_reference {
            if fft_size != config.fft_size || cp_len != config.cp_len {
                return Err(OfdmError::InvalidConfig(format!(
                    "power reference frame {}+{} does not match fft_size {} / cp_len {}",
                    fft_size, cp_len, config.fft_size, config.cp_len
                )));
            }
        }
        let framer = OfdmFramer::new(config.fft_size, config.cp_len)?;
        Ok(Self { config, framer })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn framer(&self) -> &OfdmFramer {
        &self.framer
    }

    /// Bits → time-domain waveform of whole OFDM symbols.
    ///
    /// # Errors
    /// `InvalidInputLength` unless the bit count fills whole OFDM symbols.
    pub fn transmit(&self, bits: &[u8]) -> Result<Vec<Complex64>> {
        let per_symbol = self.config.bits_per_ofdm_symbol();
        if bits.len() % per_symbol != 0 {
            return Err(OfdmError::InvalidInputLength { actual: bits.len(), multiple_of: per_symbol });
        }
        let points = map(&self.config.modulation, bits)?;
        self.framer.modulate_stream(&points)
    }

    /// Received waveform → frequency-domain points
    pub fn receive_points(&self, waveform: &[Complex64]) -> Result<Vec<Complex64>> {
        self.framer.demodulate_stream(waveform)
    }

    /// Received waveform → hard-decided bits
    pub fn receive(&self, waveform: &[Complex64]) -> Result<Vec<u8>> {
        let points = self.receive_points(waveform)?;
        Ok(demap(&self.config.modulation, &points))
    }

    fn channel(&self, snr_db: f64) -> Result<AwgnChannel> {
        Ok(AwgnChannel::new(snr_db)?.with_power_reference(self.config.power_reference))
    }

    /// One complete pass through the chain. Bits and noise both come from
    /// the stream seeded with `seed`.
    pub fn run_trial(&self, snr_db: f64, seed: u64) -> Result<TrialRecord> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let tx_bits = generate_bits_with(&mut rng, self.config.bits_per_trial());
        let tx_waveform = self.transmit(&tx_bits)?;
        let rx_waveform = self.channel(snr_db)?.apply(&tx_waveform, &mut rng)?;
        let rx_bits = self.receive(&rx_waveform)?;
        let ber = compute_ber(&tx_bits, &rx_bits)?;

        debug!(seed, snr_db, errors = ber.errors, bits = ber.total_bits, "trial complete");

        Ok(TrialRecord { seed, snr_db, tx_bits, rx_waveform, rx_bits, ber })
    }

    /// All trials of sweep point `index`, aggregated
    pub fn run_point(&self, index: usize, snr_db: f64) -> Result<BerPoint> {
        let seeds: Vec<u64> = (0..self.config.trials)
            .map(|trial| trial_seed(self.config.seed, index, trial))
            .collect();

        let run = |&seed: &u64| self.run_trial(snr_db, seed).map(|record| record.ber);
        let results: Vec<BerResult> = if self.config.parallel {
            seeds.par_iter().map(run).collect::<Result<_>>()?
        } else {
            seeds.iter().map(run).collect::<Result<_>>()?
        };

        let stats = BerStats::from_results(&results);
        info!(
            modulation = %self.config.modulation,
            snr_db,
            mean_ber = stats.mean,
            errors = stats.total_errors,
            bits = stats.total_bits,
            "BER point complete"
        );
        if stats.mean >= 0.5 {
            warn!(snr_db, mean_ber = stats.mean, "BER at or above chance level");
        }

        Ok(BerPoint { snr_db, stats })
    }

    /// Every point of the configured SNR sweep, in ascending SNR
    pub fn run_sweep(&self) -> Result<BerCurve> {
        let span = info_span!("sweep", modulation = %self.config.modulation);
        let _enter = span.enter();

        let snrs = self.config.snr_sweep.points();
        info!(points = snrs.len(), trials = self.config.trials, "starting BER sweep");

        let points = snrs
            .iter()
            .enumerate()
            .map(|(index, &snr_db)| self.run_point(index, snr_db))
            .collect::<Result<Vec<_>>>()?;

        Ok(BerCurve { modulation: self.config.modulation, points })
    }

    /// Received frequency-domain points of a single OFDM symbol, for
    /// constellation plots.
    pub fn capture_constellation(&self, snr_db: f64, seed: u64) -> Result<Vec<Complex64>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let bits = generate_bits_with(&mut rng, self.config.bits_per_ofdm_symbol());
        let tx_waveform = self.transmit(&bits)?;
        let rx_waveform = self.channel(snr_db)?.apply(&tx_waveform, &mut rng)?;
        self.receive_points(&rx_waveform)
    }
}

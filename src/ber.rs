//! Bit error counting and Monte-Carlo BER statistics

use serde::{Deserialize, Serialize};

use crate::error::{OfdmError, Result};

/// Outcome of comparing one transmitted and one received bit sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerResult {
    pub errors: usize,
    pub total_bits: usize,
    pub rate: f64,
}

/// Count positions where `tx` and `rx` differ.
///
/// Empty sequences compare as zero errors at rate 0.0.
///
/// # Errors
/// `LengthMismatch` when the lengths differ, which means a framing or mapping
/// stage upstream lost or invented bits.
pub fn compute_ber(tx: &[u8], rx: &[u8]) -> Result<BerResult> {
    if tx.len() != rx.len() {
        return Err(OfdmError::LengthMismatch { tx: tx.len(), rx: rx.len() });
    }

    let errors = tx.iter().zip(rx).filter(|(a, b)| a != b).count();
    let rate = if tx.is_empty() { 0.0 } else { errors as f64 / tx.len() as f64 };

    Ok(BerResult { errors, total_bits: tx.len(), rate })
}

/// BER aggregated over independent trials at one operating point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerStats {
    pub trials: usize,
    /// Mean of the per-trial rates
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total_errors: u64,
    pub total_bits: u64,
    /// 95% normal-approximation interval on the pooled rate (lower, upper)
    pub confidence_interval: (f64, f64),
}

impl BerStats {
    /// Aggregate trial results in the order given.
    ///
    /// Summation order is fixed by the slice, so identical inputs give
    /// bit-identical statistics.
    pub fn from_results(results: &[BerResult]) -> Self {
        if results.is_empty() {
            return Self {
                trials: 0,
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                total_errors: 0,
                total_bits: 0,
                confidence_interval: (0.0, 0.0),
            };
        }

        let trials = results.len();
        let mean = results.iter().map(|r| r.rate).sum::<f64>() / trials as f64;
        let min = results.iter().map(|r| r.rate).fold(f64::INFINITY, f64::min);
        let max = results.iter().map(|r| r.rate).fold(f64::NEG_INFINITY, f64::max);
        let total_errors: u64 = results.iter().map(|r| r.errors as u64).sum();
        let total_bits: u64 = results.iter().map(|r| r.total_bits as u64).sum();

        Self {
            trials,
            mean,
            min,
            max,
            total_errors,
            total_bits,
            confidence_interval: confidence_interval_95(total_errors, total_bits),
        }
    }

    /// Pooled rate: all errors over all bits
    pub fn pooled(&self) -> f64 {
        if self.total_bits == 0 {
            0.0
        } else {
            self.total_errors as f64 / self.total_bits as f64
        }
    }
}

fn confidence_interval_95(errors: u64, bits: u64) -> (f64, f64) {
    if bits == 0 {
        return (0.0, 0.0);
    }
    let p = errors as f64 / bits as f64;
    let half_width = 1.96 * (p * (1.0 - p) / bits as f64).sqrt();
    ((p - half_width).max(0.0), (p + half_width).min(1.0))
}

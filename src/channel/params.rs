//! Channel parameters and SNR bookkeeping

use serde::{Deserialize, Serialize};

use crate::utils::{db_to_power_ratio, power_ratio_to_db};

/// Which transmitted samples define the signal power the SNR is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerReference {
    /// Every sample on the wire, cyclic prefix included
    #[default]
    IncludePrefix,
    /// Only the N-sample body of each `fft_size + cp_len` frame
    ExcludePrefix { fft_size: usize, cp_len: usize },
}

/// Noise level derived from a measured signal power and a target SNR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParameters {
    pub snr_db: f64,
    /// Mean |x|² of the reference samples
    pub signal_power: f64,
    /// Total complex noise power, E|n|²
    pub noise_power: f64,
}

impl ChannelParameters {
    pub fn derive(signal_power: f64, snr_db: f64) -> Self {
        Self {
            snr_db,
            signal_power,
            noise_power: signal_power / db_to_power_ratio(snr_db),
        }
    }

    /// Variance of each of the real and imaginary noise components
    pub fn per_component_variance(&self) -> f64 {
        self.noise_power / 2.0
    }
}

/// N / (N + N_CP): share of transmitted samples carrying payload
pub fn ofdm_overhead_factor(fft_size: usize, cp_len: usize) -> f64 {
    fft_size as f64 / (fft_size + cp_len) as f64
}

/// Per-sample SNR (dB) that corresponds to a given Eb/N0 (dB).
///
/// `overhead` is the factor from [`ofdm_overhead_factor`] when the energy
/// spent on the cyclic prefix should be charged to the bits, `None` otherwise.
pub fn snr_db_from_ebn0(ebn0_db: f64, bits_per_symbol: usize, overhead: Option<f64>) -> f64 {
    let mut snr = ebn0_db + power_ratio_to_db(bits_per_symbol as f64);
    if let Some(factor) = overhead {
        snr += power_ratio_to_db(factor);
    }
    snr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_noise_power() {
        let p = ChannelParameters::derive(2.0, 10.0);
        assert!((p.noise_power - 0.2).abs() < 1e-12);
        assert!((p.per_component_variance() - 0.1).abs() < 1e-12);

        let p = ChannelParameters::derive(1.0, 0.0);
        assert!((p.noise_power - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overhead_and_ebn0() {
        assert!((ofdm_overhead_factor(64, 16) - 0.8).abs() < 1e-12);

        // QPSK: SNR = Eb/N0 + 3.01 dB
        let snr = snr_db_from_ebn0(7.0, 2, None);
        assert!((snr - (7.0 + 10.0 * 2f64.log10())).abs() < 1e-12);

        let with_cp = snr_db_from_ebn0(7.0, 2, Some(0.8));
        assert!(with_cp < snr);
    }

    #[test]
    fn test_power_reference_serde() {
        let r: PowerReference = serde_json::from_str("\"include_prefix\"").unwrap();
        assert_eq!(r, PowerReference::IncludePrefix);

        let r: PowerReference =
            serde_json::from_str(r#"{"exclude_prefix":{"fft_size":64,"cp_len":16}}"#).unwrap();
        assert_eq!(r, PowerReference::ExcludePrefix { fft_size: 64, cp_len: 16 });
    }
}

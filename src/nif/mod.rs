//! NIF interface for Elixir
//!
//! Exposes the transceiver stages to an Elixir orchestrator, which owns
//! sweeps, plotting and CSV export. Complex samples cross the boundary as
//! `{re, im}` float tuples and schemes as the atoms `:qpsk` / `:qam16`.

use num_complex::Complex64;
use rustler::{Atom, NifResult, NifStruct};

use crate::channel::PowerReference;
use crate::config::{SimulationConfig, SnrSweep};
use crate::error::OfdmError;
use crate::modem::Modulation;
use crate::ofdm::OfdmFramer;
use crate::sim::Simulator;

rustler::atoms! {
    qpsk,
    qam16,
}

rustler::init!("Elixir.OfdmBer.Native");

/// Simulation parameters from Elixir
#[derive(NifStruct, Debug, Clone)]
#[module = "OfdmBer.SimulationConfig"]
pub struct NifSimulationConfig {
    pub fft_size: usize,
    pub cp_len: usize,
    pub modulation: Atom,
    pub symbols_per_trial: usize,
    pub trials: usize,
    pub snr_start_db: f64,
    pub snr_stop_db: f64,
    pub snr_step_db: f64,
    pub seed: u64,
    pub exclude_prefix: bool,
}

impl NifSimulationConfig {
    fn into_config(self) -> Result<SimulationConfig, OfdmError> {
        let power_reference = if self.exclude_prefix {
            PowerReference::ExcludePrefix { fft_size: self.fft_size, cp_len: self.cp_len }
        } else {
            PowerReference::IncludePrefix
        };

        Ok(SimulationConfig {
            fft_size: self.fft_size,
            cp_len: self.cp_len,
            modulation: atom_to_modulation(self.modulation)?,
            symbols_per_trial: self.symbols_per_trial,
            trials: self.trials,
            snr_sweep: SnrSweep {
                start_db: self.snr_start_db,
                stop_db: self.snr_stop_db,
                step_db: self.snr_step_db,
            },
            seed: self.seed,
            power_reference,
            parallel: true,
        })
    }
}

fn atom_to_modulation(atom: Atom) -> Result<Modulation, OfdmError> {
    if atom == qpsk() {
        Ok(Modulation::Qpsk)
    } else if atom == qam16() {
        Ok(Modulation::Qam16)
    } else {
        Err(OfdmError::UnsupportedScheme(format!("{:?}", atom)))
    }
}

fn to_nif_error(err: OfdmError) -> rustler::Error {
    rustler::Error::Term(Box::new(err.to_string()))
}

fn to_complex(samples: &[(f64, f64)]) -> Vec<Complex64> {
    samples.iter().map(|&(re, im)| Complex64::new(re, im)).collect()
}

fn from_complex(samples: &[Complex64]) -> Vec<(f64, f64)> {
    samples.iter().map(|s| (s.re, s.im)).collect()
}

// ============================================================================
// Stage NIFs
// ============================================================================

/// Seeded random bits (0/1)
#[rustler::nif]
pub fn generate_bits(count: usize, seed: u64) -> Vec<u8> {
    crate::bits::generate_bits(count, seed)
}

/// Bits → constellation points
#[rustler::nif]
pub fn map_bits(modulation: Atom, bits: Vec<u8>) -> NifResult<Vec<(f64, f64)>> {
    let modulation = atom_to_modulation(modulation).map_err(to_nif_error)?;
    let points = crate::modem::map(&modulation, &bits).map_err(to_nif_error)?;
    Ok(from_complex(&points))
}

/// Points → hard-decided bits
#[rustler::nif]
pub fn demap_points(modulation: Atom, points: Vec<(f64, f64)>) -> NifResult<Vec<u8>> {
    let modulation = atom_to_modulation(modulation).map_err(to_nif_error)?;
    Ok(crate::modem::demap(&modulation, &to_complex(&points)))
}

/// One block of N subcarrier values → N + N_CP time samples
#[rustler::nif]
pub fn frame(fft_size: usize, cp_len: usize, block: Vec<(f64, f64)>) -> NifResult<Vec<(f64, f64)>> {
    let framer = OfdmFramer::new(fft_size, cp_len).map_err(to_nif_error)?;
    let frame = framer.frame(&to_complex(&block)).map_err(to_nif_error)?;
    Ok(from_complex(frame.samples()))
}

/// N + N_CP received samples → N subcarrier values
#[rustler::nif]
pub fn unframe(fft_size: usize, cp_len: usize, samples: Vec<(f64, f64)>) -> NifResult<Vec<(f64, f64)>> {
    let framer = OfdmFramer::new(fft_size, cp_len).map_err(to_nif_error)?;
    let block = framer.unframe(&to_complex(&samples)).map_err(to_nif_error)?;
    Ok(from_complex(&block))
}

/// Add seeded AWGN at `snr_db`, power measured over every sample
#[rustler::nif]
pub fn apply_channel(samples: Vec<(f64, f64)>, snr_db: f64, seed: u64) -> NifResult<Vec<(f64, f64)>> {
    let noisy = crate::channel::apply_channel(&to_complex(&samples), snr_db, seed).map_err(to_nif_error)?;
    Ok(from_complex(&noisy))
}

/// Returns `{error_count, rate}`
#[rustler::nif]
pub fn compute_ber(tx: Vec<u8>, rx: Vec<u8>) -> NifResult<(usize, f64)> {
    let result = crate::ber::compute_ber(&tx, &rx).map_err(to_nif_error)?;
    Ok((result.errors, result.rate))
}

// ============================================================================
// Sweep NIF
// ============================================================================

/// Full BER sweep. Returns `[{snr_db, mean_ber, errors, bits}]` in SNR order.
#[rustler::nif(schedule = "DirtyCpu")]
pub fn run_sweep(config: NifSimulationConfig) -> NifResult<Vec<(f64, f64, u64, u64)>> {
    let config = config.into_config().map_err(to_nif_error)?;
    let curve = Simulator::new(config)
        .and_then(|sim| sim.run_sweep())
        .map_err(to_nif_error)?;

    Ok(curve
        .points
        .iter()
        .map(|p| (p.snr_db, p.stats.mean, p.stats.total_errors, p.stats.total_bits))
        .collect())
}

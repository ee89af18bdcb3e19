//! OFDM BER - Baseband OFDM transceiver and AWGN bit-error-rate simulator
//!
//! This crate provides the signal-processing core of an OFDM link:
//! Gray-coded QPSK / 16-QAM mapping, IDFT + cyclic-prefix framing, an AWGN
//! channel scaled to a target SNR, hard-decision demapping and BER counting.
//! Every stage is a pure function of its inputs and an explicit seeded
//! random stream, so Monte-Carlo trials run independently and in parallel.
//! Sweeps, plotting and persistence belong to the caller; with the `nif`
//! feature the core is exposed to an Elixir orchestrator through Rustler.

pub mod ber;
pub mod bits;
pub mod channel;
pub mod config;
pub mod constellations;
pub mod error;
pub mod logging;
pub mod modem;
pub mod ofdm;
pub mod sim;
pub mod traits;
mod utils;

#[cfg(feature = "nif")]
pub mod nif;

// Re-export core types for convenience
pub use ber::{compute_ber, BerResult, BerStats};
pub use bits::{generate_bits, generate_bits_with};
pub use channel::{apply_channel, AwgnChannel, ChannelParameters, PowerReference};
pub use config::{SimulationConfig, SnrSweep};
pub use constellations::{Qam16, Qpsk};
pub use error::{OfdmError, Result};
pub use modem::{demap, map, Modulation};
pub use ofdm::{map_to_subcarriers, OfdmFrame, OfdmFramer};
pub use sim::{BerCurve, BerPoint, Simulator, TrialRecord};
pub use traits::Constellation;
pub use utils::{db_to_power_ratio, mean_power, power_ratio_to_db};

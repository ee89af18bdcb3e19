//! Noise channel model
//!
//! Additive white Gaussian noise only; no fading, multipath or offsets.

mod awgn;
mod noise;
mod params;

pub use awgn::{apply_channel, AwgnChannel};
pub use noise::NoiseGenerator;
pub use params::{ofdm_overhead_factor, snr_db_from_ebn0, ChannelParameters, PowerReference};

//! Core DSP traits for the transceiver
//!
//! These traits define mathematical behavior, not schemes or runs.

mod constellation;

pub use constellation::Constellation;

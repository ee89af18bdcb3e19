//! Monte-Carlo BER simulation over the transceiver chain

mod runner;


pub use runner::{trial_seed, BerCurve, BerPoint, Simulator, TrialRecord};

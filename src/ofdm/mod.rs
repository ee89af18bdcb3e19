//! OFDM time/frequency framing
//!
//! Size-N IDFT plus cyclic prefix on transmit, prefix removal plus size-N
//! DFT on receive.

mod frame;
mod framer;

pub use frame::OfdmFrame;
pub use framer::{map_to_subcarriers, OfdmFramer};

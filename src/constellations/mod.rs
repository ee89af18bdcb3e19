//! Constellation implementations
//!
//! The two alphabets carried on OFDM subcarriers:
//! - QPSK (2 bits/symbol)
//! - 16-QAM (4 bits/symbol)

mod qpsk;
mod qam16;

pub use qpsk::Qpsk;
pub use qam16::Qam16;

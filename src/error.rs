//! Error types for the transceiver core

use thiserror::Error;

/// Result type for transceiver operations
pub type Result<T> = std::result::Result<T, OfdmError>;

/// Errors raised by the mapping, framing, channel and BER stages.
///
/// All of them are local and synchronous: the failing call has no side
/// effects and the caller decides whether to abort, skip or log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OfdmError {
    /// Sequence length not aligned to the symbol or frame size
    #[error("invalid input length {actual}: must be a multiple of {multiple_of}")]
    InvalidInputLength { actual: usize, multiple_of: usize },

    /// Unknown modulation tag
    #[error("unsupported modulation scheme: {0}")]
    UnsupportedScheme(String),

    /// More symbols than subcarriers in one block
    #[error("{symbols} symbols do not fit on {fft_size} subcarriers")]
    TooManySymbols { symbols: usize, fft_size: usize },

    /// FFT size / cyclic prefix combination is not usable
    #[error("invalid frame parameters: fft_size={fft_size}, cp_len={cp_len} (need 0 < cp_len < fft_size)")]
    InvalidFrameParameters { fft_size: usize, cp_len: usize },

    /// Transmitted and received bit counts differ
    #[error("bit sequence length mismatch: tx={tx}, rx={rx}")]
    LengthMismatch { tx: usize, rx: usize },

    /// Bit sequence element other than 0 or 1
    #[error("invalid bit value {value} at index {index}")]
    InvalidBitValue { index: usize, value: u8 },

    /// Simulation configuration rejected
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OfdmError::InvalidInputLength { actual: 7, multiple_of: 2 };
        assert_eq!(err.to_string(), "invalid input length 7: must be a multiple of 2");

        let err = OfdmError::LengthMismatch { tx: 128, rx: 126 };
        assert!(err.to_string().contains("tx=128"));

        let err = OfdmError::TooManySymbols { symbols: 17, fft_size: 16 };
        assert_eq!(err.to_string(), "17 symbols do not fit on 16 subcarriers");
    }
}

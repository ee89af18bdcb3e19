//! OFDM framer
//!
//! Transmit: block of N subcarrier values → IDFT (scaled 1/N) → prepend the
//! last N_CP samples. Receive: drop the first N_CP samples unconditionally →
//! unscaled DFT. With no channel in between the two are exact inverses up to
//! floating-point error.
//!
//! Transforms are planned once per framer and shared, so a framer is cheap to
//! clone into parallel workers.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use super::OfdmFrame;
use crate::error::{OfdmError, Result};

#[derive(Clone)]
pub struct OfdmFramer {
    fft_size: usize,
    cp_len: usize,
    ifft: Arc<dyn Fft<f64>>,
    fft: Arc<dyn Fft<f64>>,
}

impl OfdmFramer {
    /// Create a framer for `fft_size` subcarriers and a `cp_len`-sample prefix.
    ///
    /// # Errors
    /// `InvalidFrameParameters` unless `0 < cp_len < fft_size`.
    pub fn new(fft_size: usize, cp_len: usize) -> Result<Self> {
        if fft_size == 0 || cp_len == 0 || cp_len >= fft_size {
            return Err(OfdmError::InvalidFrameParameters { fft_size, cp_len });
        }

        let mut planner = FftPlanner::<f64>::new();
        Ok(Self {
            fft_size,
            cp_len,
            ifft: planner.plan_fft_inverse(fft_size),
            fft: planner.plan_fft_forward(fft_size),
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn cp_len(&self) -> usize {
        self.cp_len
    }

    /// Samples per transmitted OFDM symbol (N + N_CP)
    pub fn frame_len(&self) -> usize {
        self.fft_size + self.cp_len
    }

    /// Fraction of transmitted samples that carry the payload, N / (N + N_CP)
    pub fn overhead_factor(&self) -> f64 {
        self.fft_size as f64 / self.frame_len() as f64
    }

    /// Turn one block of N frequency-domain symbols into a time-domain frame.
    pub fn frame(&self, block: &[Complex64]) -> Result<OfdmFrame> {
        if block.len() != self.fft_size {
            return Err(OfdmError::InvalidInputLength {
                actual: block.len(),
                multiple_of: self.fft_size,
            });
        }

        let mut body = block.to_vec();
        self.ifft.process(&mut body);

        // rustfft's inverse is unscaled
        let scale = 1.0 / self.fft_size as f64;
        for s in &mut body {
            *s *= scale;
        }

        Ok(OfdmFrame::from_body(body, self.cp_len))
    }

    /// Recover N frequency-domain values from N + N_CP received samples.
    ///
    /// The prefix is discarded without inspection.
    pub fn unframe(&self, samples: &[Complex64]) -> Result<Vec<Complex64>> {
        if samples.len() != self.frame_len() {
            return Err(OfdmError::InvalidInputLength {
                actual: samples.len(),
                multiple_of: self.frame_len(),
            });
        }

        let mut freq = samples[self.cp_len..].to_vec();
        self.fft.process(&mut freq);
        Ok(freq)
    }

    /// Frame a point sequence spanning several OFDM symbols.
    ///
    /// Returns the concatenated waveform, `frame_len()` samples per symbol.
    pub fn modulate_stream(&self, points: &[Complex64]) -> Result<Vec<Complex64>> {
        if points.len() % self.fft_size != 0 {
            return Err(OfdmError::InvalidInputLength {
                actual: points.len(),
                multiple_of: self.fft_size,
            });
        }

        let mut waveform = Vec::with_capacity(points.len() / self.fft_size * self.frame_len());
        for block in points.chunks_exact(self.fft_size) {
            waveform.extend_from_slice(self.frame(block)?.samples());
        }
        Ok(waveform)
    }

    /// Inverse of [`modulate_stream`](Self::modulate_stream).
    pub fn demodulate_stream(&self, samples: &[Complex64]) -> Result<Vec<Complex64>> {
        let frame_len = self.frame_len();
        if samples.len() % frame_len != 0 {
            return Err(OfdmError::InvalidInputLength {
                actual: samples.len(),
                multiple_of: frame_len,
            });
        }

        let mut points = Vec::with_capacity(samples.len() / frame_len * self.fft_size);
        for frame in samples.chunks_exact(frame_len) {
            points.extend(self.unframe(frame)?);
        }
        Ok(points)
    }
}

impl fmt::Debug for OfdmFramer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfdmFramer")
            .field("fft_size", &self.fft_size)
            .field("cp_len", &self.cp_len)
            .finish()
    }
}

/// Place `symbols` on the first subcarriers of an N-point block, zero-filling the rest.
///
/// # Errors
/// `TooManySymbols` when `symbols` is longer than `fft_size`.
pub fn map_to_subcarriers(symbols: &[Complex64], fft_size: usize) -> Result<Vec<Complex64>> {
    if symbols.len() > fft_size {
        return Err(OfdmError::TooManySymbols { symbols: symbols.len(), fft_size });
    }

    let mut block = vec![Complex64::new(0.0, 0.0); fft_size];
    block[..symbols.len()].copy_from_slice(symbols);
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::generate_bits;
    use crate::modem::{map, Modulation};

    fn qpsk_block(n: usize, seed: u64) -> Vec<Complex64> {
        map(&Modulation::Qpsk, &generate_bits(2 * n, seed)).unwrap()
    }

    fn max_err(a: &[Complex64], b: &[Complex64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).norm()).fold(0.0, f64::max)
    }

    #[test]
    fn test_frame_length() {
        let framer = OfdmFramer::new(64, 16).unwrap();
        let frame = framer.frame(&qpsk_block(64, 1)).unwrap();
        assert_eq!(frame.len(), 80);
        assert_eq!(frame.body().len(), 64);
        assert_eq!(frame.fft_size(), 64);
    }

    #[test]
    fn test_cyclic_prefix_copies_tail() {
        let framer = OfdmFramer::new(64, 16).unwrap();
        for seed in 0..10 {
            let frame = framer.frame(&qpsk_block(64, seed)).unwrap();
            let body = frame.body();
            assert_eq!(frame.prefix(), &body[body.len() - 16..]);
        }
    }

    #[test]
    fn test_idft_scaling() {
        // Single DC subcarrier → constant 1/N in time
        let framer = OfdmFramer::new(8, 2).unwrap();
        let mut block = vec![Complex64::new(0.0, 0.0); 8];
        block[0] = Complex64::new(1.0, 0.0);

        let frame = framer.frame(&block).unwrap();
        for s in frame.samples() {
            assert!((s - Complex64::new(0.125, 0.0)).norm() < 1e-12, "sample {}", s);
        }
    }

    #[test]
    fn test_idft_direction() {
        // Subcarrier k=1 → e^{+j2πn/N}/N
        let n = 16;
        let framer = OfdmFramer::new(n, 4).unwrap();
        let mut block = vec![Complex64::new(0.0, 0.0); n];
        block[1] = Complex64::new(1.0, 0.0);

        let frame = framer.frame(&block).unwrap();
        for (t, s) in frame.body().iter().enumerate() {
            let phase = 2.0 * std::f64::consts::PI * t as f64 / n as f64;
            let expected = Complex64::from_polar(1.0 / n as f64, phase);
            assert!((s - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_roundtrip_exact() {
        for &(n, cp) in &[(64, 16), (48, 12), (7, 3), (2, 1)] {
            let framer = OfdmFramer::new(n, cp).unwrap();
            let block = qpsk_block(n, n as u64);
            let frame = framer.frame(&block).unwrap();
            let recovered = framer.unframe(frame.samples()).unwrap();
            assert!(max_err(&block, &recovered) < 1e-12, "n={} cp={}", n, cp);
        }
    }

    #[test]
    fn test_unframe_ignores_prefix() {
        let framer = OfdmFramer::new(32, 8).unwrap();
        let block = qpsk_block(32, 5);
        let mut samples = framer.frame(&block).unwrap().into_samples();

        for s in &mut samples[..8] {
            *s = Complex64::new(100.0, -100.0);
        }

        let recovered = framer.unframe(&samples).unwrap();
        assert!(max_err(&block, &recovered) < 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        for &(n, cp) in &[(0, 0), (64, 0), (64, 64), (16, 32)] {
            assert_eq!(
                OfdmFramer::new(n, cp).unwrap_err(),
                OfdmError::InvalidFrameParameters { fft_size: n, cp_len: cp }
            );
        }
    }

    #[test]
    fn test_wrong_block_lengths() {
        let framer = OfdmFramer::new(64, 16).unwrap();
        assert!(matches!(
            framer.frame(&qpsk_block(32, 0)),
            Err(OfdmError::InvalidInputLength { actual: 32, multiple_of: 64 })
        ));
        assert!(matches!(
            framer.unframe(&vec![Complex64::new(0.0, 0.0); 64]),
            Err(OfdmError::InvalidInputLength { actual: 64, multiple_of: 80 })
        ));
    }

    #[test]
    fn test_stream_roundtrip() {
        let framer = OfdmFramer::new(64, 16).unwrap();
        let points = qpsk_block(64 * 5, 11);

        let waveform = framer.modulate_stream(&points).unwrap();
        assert_eq!(waveform.len(), 5 * 80);

        let recovered = framer.demodulate_stream(&waveform).unwrap();
        assert!(max_err(&points, &recovered) < 1e-12);

        assert!(framer.modulate_stream(&points[..100]).is_err());
        assert!(framer.demodulate_stream(&waveform[..79]).is_err());
    }

    #[test]
    fn test_map_to_subcarriers() {
        let syms = qpsk_block(10, 2);
        let block = map_to_subcarriers(&syms, 16).unwrap();
        assert_eq!(&block[..10], &syms[..]);
        assert!(block[10..].iter().all(|s| s.norm() == 0.0));

        assert_eq!(
            map_to_subcarriers(&qpsk_block(17, 2), 16).unwrap_err(),
            OfdmError::TooManySymbols { symbols: 17, fft_size: 16 }
        );
        assert_eq!(map_to_subcarriers(&syms, 10).unwrap(), syms);
    }

    #[test]
    fn test_overhead_factor() {
        let framer = OfdmFramer::new(64, 16).unwrap();
        assert!((framer.overhead_factor() - 0.8).abs() < 1e-12);
    }
}

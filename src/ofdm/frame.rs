//! One transmitted OFDM symbol in the time domain

use num_complex::Complex64;

/// Cyclic prefix followed by the N-sample IDFT output.
///
/// Only [`OfdmFramer`](super::OfdmFramer) builds frames, so the first
/// `cp_len` samples are always a verbatim copy of the last `cp_len`.
#[derive(Debug, Clone, PartialEq)]
pub struct OfdmFrame {
    samples: Vec<Complex64>,
    cp_len: usize,
}

impl OfdmFrame {
    pub(super) fn from_body(body: Vec<Complex64>, cp_len: usize) -> Self {
        let n = body.len();
        let mut samples = Vec::with_capacity(n + cp_len);
        samples.extend_from_slice(&body[n - cp_len..]);
        samples.extend(body);
        Self { samples, cp_len }
    }

    /// All N + N_CP samples, prefix first
    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Complex64> {
        self.samples
    }

    pub fn prefix(&self) -> &[Complex64] {
        &self.samples[..self.cp_len]
    }

    /// The N time-domain samples following the prefix
    pub fn body(&self) -> &[Complex64] {
        &self.samples[self.cp_len..]
    }

    pub fn cp_len(&self) -> usize {
        self.cp_len
    }

    pub fn fft_size(&self) -> usize {
        self.samples.len() - self.cp_len
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

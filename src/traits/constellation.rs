//! Constellation trait - Symbol ↔ I/Q mapping
//!
//! Defines how symbol indices map to complex baseband points.
//! A symbol index packs the bits of one group MSB-first, so bit 0 of the
//! group is the highest bit of the index.

use num_complex::Complex64;

/// Symbol alphabet mapping trait
///
/// Implementations define the geometry of the constellation diagram and its
/// Gray labelling. Used by both the mapper (symbol → I/Q) and the demapper
/// (I/Q → symbol).
pub trait Constellation: Send + Sync {
    /// Number of points in the constellation (4 for QPSK, 16 for 16-QAM)
    fn order(&self) -> usize;

    /// Bits per symbol (log2 of order)
    fn bits_per_symbol(&self) -> usize {
        self.order().trailing_zeros() as usize
    }

    /// Scale applied to the integer grid so the alphabet has unit average energy
    fn normalization(&self) -> f64;

    /// Map a symbol index to I/Q coordinates
    ///
    /// # Arguments
    /// * `sym` - Symbol index (0 to order-1)
    ///
    /// # Returns
    /// Tuple of (I, Q) coordinates, already normalized
    fn symbol_to_iq(&self, sym: u8) -> (f64, f64);

    /// Decide the nearest symbol from I/Q coordinates (hard decision)
    ///
    /// Defaults to [`nearest_symbol`](Self::nearest_symbol). Schemes with a
    /// per-axis slicer override it and may resolve points exactly on a
    /// decision boundary differently; off the boundaries both agree.
    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        self.nearest_symbol(i, q)
    }

    /// Exhaustive minimum-Euclidean-distance search over the alphabet.
    ///
    /// On equal distances the lowest symbol index wins. This is the reference
    /// decision, not necessarily what `iq_to_symbol` returns on a boundary:
    /// the 16-QAM slicer sends boundary values to the upper level instead.
    fn nearest_symbol(&self, i: f64, q: f64) -> u8 {
        let mut best_sym = 0u8;
        let mut best_dist = f64::MAX;

        for sym in 0..self.order() as u8 {
            let (ci, cq) = self.symbol_to_iq(sym);
            let di = i - ci;
            let dq = q - cq;
            let dist = di * di + dq * dq;
            if dist < best_dist {
                best_dist = dist;
                best_sym = sym;
            }
        }

        best_sym
    }

    /// Constellation point for a symbol index
    fn point(&self, sym: u8) -> Complex64 {
        let (i, q) = self.symbol_to_iq(sym);
        Complex64::new(i, q)
    }

    /// Every point of the alphabet, indexed by symbol
    fn alphabet(&self) -> Vec<Complex64> {
        (0..self.order() as u8).map(|sym| self.point(sym)).collect()
    }
}

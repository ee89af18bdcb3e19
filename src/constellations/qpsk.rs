//! QPSK constellation (2 bits per symbol)
//!
//! Gray-coded mapping, first bit of the pair selects the Q sign and the
//! second bit the I sign:
//! Symbol 00 → 45°  (I=+1, Q=+1) / √2
//! Symbol 01 → 135° (I=-1, Q=+1) / √2
//! Symbol 11 → 225° (I=-1, Q=-1) / √2
//! Symbol 10 → 315° (I=+1, Q=-1) / √2

use crate::traits::Constellation;
use std::f64::consts::FRAC_1_SQRT_2;

/// Quadrature Phase Shift Keying constellation (Gray coded)
#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl Constellation for Qpsk {
    fn order(&self) -> usize {
        4
    }

    fn normalization(&self) -> f64 {
        FRAC_1_SQRT_2
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        let i = if (sym & 0x01) == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        let q = if (sym & 0x02) == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        (i, q)
    }

    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        // Zero slices to the positive half-plane
        let mut sym = 0u8;
        if i < 0.0 { sym |= 0x01; }
        if q < 0.0 { sym |= 0x02; }
        sym
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qpsk_points_decide_to_themselves() {
        for (sym, p) in Qpsk.alphabet().into_iter().enumerate() {
            assert!((p.norm_sqr() - 1.0).abs() < 1e-12, "|s{}|² = {}", sym, p.norm_sqr());
            assert_eq!(Qpsk.iq_to_symbol(p.re, p.im) as usize, sym);
        }
    }

    #[test]
    fn test_qpsk_gray_table() {
        // bits -> (sign I, sign Q)
        let expected = [(0b00, 1.0, 1.0), (0b01, -1.0, 1.0), (0b11, -1.0, -1.0), (0b10, 1.0, -1.0)];
        for &(sym, si, sq) in &expected {
            let (i, q) = Qpsk.symbol_to_iq(sym);
            assert_eq!(i.signum(), si, "sym {:02b} I sign", sym);
            assert_eq!(q.signum(), sq, "sym {:02b} Q sign", sym);
        }
    }

    #[test]
    fn test_qpsk_slicer_matches_nearest_search() {
        let probes = [(0.3, 0.2), (-0.1, 0.9), (-2.0, -0.01), (0.5, -3.0), (0.0, 0.0), (0.0, -1.0)];
        for &(i, q) in &probes {
            assert_eq!(Qpsk.iq_to_symbol(i, q), Qpsk.nearest_symbol(i, q), "probe ({}, {})", i, q);
        }
    }

    #[test]
    fn test_two_bits_per_point() {
        assert_eq!((Qpsk.order(), Qpsk.bits_per_symbol()), (4, 2));
    }
}

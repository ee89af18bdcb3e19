//! Bit ↔ constellation point conversion
//!
//! Generic over [`Constellation`]: bits are grouped `bits_per_symbol` at a
//! time, packed MSB-first into a symbol index, and looked up in the
//! alphabet. The demapper runs the constellation's hard decision and unpacks
//! the index back into bits.

use num_complex::Complex64;

use crate::error::{OfdmError, Result};
use crate::traits::Constellation;

/// Map a bit sequence to constellation points, one point per bit group.
///
/// # Errors
/// * `InvalidInputLength` - length is not a multiple of `bits_per_symbol`
/// * `InvalidBitValue` - an element is neither 0 nor 1
pub fn map<C: Constellation + ?Sized>(constellation: &C, bits: &[u8]) -> Result<Vec<Complex64>> {
    let k = constellation.bits_per_symbol();
    if bits.len() % k != 0 {
        return Err(OfdmError::InvalidInputLength { actual: bits.len(), multiple_of: k });
    }
    if let Some((index, &value)) = bits.iter().enumerate().find(|(_, &b)| b > 1) {
        return Err(OfdmError::InvalidBitValue { index, value });
    }

    Ok(bits
        .chunks_exact(k)
        .map(|group| constellation.point(pack_symbol(group)))
        .collect())
}

/// Recover bits from received points by nearest-point decision.
pub fn demap<C: Constellation + ?Sized>(constellation: &C, points: &[Complex64]) -> Vec<u8> {
    let k = constellation.bits_per_symbol();
    let mut bits = Vec::with_capacity(points.len() * k);

    for p in points {
        let sym = constellation.iq_to_symbol(p.re, p.im);
        unpack_symbol(sym, k, &mut bits);
    }

    bits
}

/// Pack a bit group MSB-first into a symbol index
#[inline]
pub(crate) fn pack_symbol(group: &[u8]) -> u8 {
    group.iter().fold(0u8, |acc, &b| (acc << 1) | b)
}

/// Append the `k` bits of `sym` MSB-first
#[inline]
pub(crate) fn unpack_symbol(sym: u8, k: usize, out: &mut Vec<u8>) {
    for shift in (0..k).rev() {
        out.push((sym >> shift) & 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellations::{Qam16, Qpsk};
    use crate::modem::Modulation;

    #[test]
    fn test_map_qpsk_in_order() {
        let bits = [0, 0, 0, 1, 1, 1, 1, 0];
        let points = map(&Qpsk, &bits).unwrap();
        let v = std::f64::consts::FRAC_1_SQRT_2;

        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Complex64::new(v, v));
        assert_eq!(points[1], Complex64::new(-v, v));
        assert_eq!(points[2], Complex64::new(-v, -v));
        assert_eq!(points[3], Complex64::new(v, -v));
    }

    #[test]
    fn test_map_qam16_groups_of_four() {
        let bits = [1, 0, 1, 1, 0, 1, 0, 0];
        let points = map(&Qam16, &bits).unwrap();
        let s = 1.0 / 10f64.sqrt();

        assert_eq!(points.len(), 2);
        assert!((points[0] - Complex64::new(3.0 * s, 1.0 * s)).norm() < 1e-12);
        assert!((points[1] - Complex64::new(-1.0 * s, -3.0 * s)).norm() < 1e-12);
    }

    #[test]
    fn test_map_rejects_misaligned_length() {
        assert_eq!(
            map(&Qpsk, &[0, 1, 1]).unwrap_err(),
            OfdmError::InvalidInputLength { actual: 3, multiple_of: 2 }
        );
        assert_eq!(
            map(&Modulation::Qam16, &[0, 1, 1, 0, 1, 1]).unwrap_err(),
            OfdmError::InvalidInputLength { actual: 6, multiple_of: 4 }
        );
    }

    #[test]
    fn test_map_rejects_non_binary() {
        assert_eq!(
            map(&Qpsk, &[0, 1, 2, 0]).unwrap_err(),
            OfdmError::InvalidBitValue { index: 2, value: 2 }
        );
    }

    #[test]
    fn test_map_empty() {
        assert!(map(&Qam16, &[]).unwrap().is_empty());
        assert!(demap(&Qam16, &[]).is_empty());
    }

    #[test]
    fn test_demap_inverts_map() {
        for m in Modulation::ALL {
            let k = m.bits_per_symbol();
            // Every symbol once
            let bits: Vec<u8> = (0..m.order() as u8)
                .flat_map(|sym| {
                    let mut v = Vec::new();
                    unpack_symbol(sym, k, &mut v);
                    v
                })
                .collect();
            let points = map(&m, &bits).unwrap();
            assert_eq!(demap(&m, &points), bits, "{} roundtrip", m);
        }
    }

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack_symbol(&[1, 0, 1, 1]), 0b1011);
        let mut out = Vec::new();
        unpack_symbol(0b10, 2, &mut out);
        assert_eq!(out, vec![1, 0]);
    }
}

//! 16-QAM constellation (4 bits per symbol)
//!
//! Gray-coded 4x4 grid normalized to average unit power.
//! The first bit pair selects the I level, the second pair the Q level,
//! each through the same per-axis Gray code.
//! Points at ±1, ±3 scaled by 1/√10 for unit average power.

use crate::traits::Constellation;

/// 16-Quadrature Amplitude Modulation constellation (rectangular, Gray coded)
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam16;

// Normalization factor for unit average power: 1/√10
const NORM: f64 = 0.316_227_766_016_837_94;

// Gray-coded levels for 2 bits: 00→-3, 01→-1, 11→+1, 10→+3
const LEVELS: [f64; 4] = [-3.0, -1.0, 1.0, 3.0];

impl Constellation for Qam16 {
    fn order(&self) -> usize {
        16
    }

    fn normalization(&self) -> f64 {
        NORM
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        // Bits: b3 b2 b1 b0
        // I determined by b3 b2, Q determined by b1 b0
        let i_idx = gray2_to_index((sym >> 2) & 0x03);
        let q_idx = gray2_to_index(sym & 0x03);

        (LEVELS[i_idx] * NORM, LEVELS[q_idx] * NORM)
    }

    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        let i_idx = level_to_index(i / NORM);
        let q_idx = level_to_index(q / NORM);

        (index_to_gray2(i_idx) << 2) | index_to_gray2(q_idx)
    }
}

/// Convert 2-bit Gray code to level index (0-3)
fn gray2_to_index(gray: u8) -> usize {
    match gray & 0x03 {
        0b00 => 0, // -3
        0b01 => 1, // -1
        0b11 => 2, // +1
        _ => 3,    // 0b10, +3
    }
}

/// Convert level index (0-3) to 2-bit Gray code
fn index_to_gray2(idx: usize) -> u8 {
    match idx {
        0 => 0b00,
        1 => 0b01,
        2 => 0b11,
        _ => 0b10,
    }
}

/// Decide which level index is nearest; a value on a boundary takes the upper level
fn level_to_index(val: f64) -> usize {
    if val < -2.0 {
        0
    } else if val < 0.0 {
        1
    } else if val < 2.0 {
        2
    } else {
        3
    }
}

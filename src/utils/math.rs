//! Small DSP math helpers

use num_complex::Complex64;

/// Convert a power ratio in dB to linear scale
#[inline]
pub fn db_to_power_ratio(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert a linear power ratio to dB
#[inline]
pub fn power_ratio_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// Mean of |x|² over a sample slice (0.0 for an empty slice)
#[inline]
pub fn mean_power(samples: &[Complex64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.norm_sqr()).sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversion() {
        assert!((db_to_power_ratio(0.0) - 1.0).abs() < 1e-12);
        assert!((db_to_power_ratio(10.0) - 10.0).abs() < 1e-12);
        assert!((db_to_power_ratio(-10.0) - 0.1).abs() < 1e-12);
        assert!((power_ratio_to_db(100.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_power() {
        let s = [Complex64::new(3.0, 4.0), Complex64::new(0.0, 1.0)];
        assert!((mean_power(&s) - 13.0).abs() < 1e-12);
        assert_eq!(mean_power(&[]), 0.0);
    }
}

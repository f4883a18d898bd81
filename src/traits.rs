//! Float tolerance helpers shared by the numeric model, the simplifier and the
//! polynomial routines.
//!
//! These provide safe floating-point comparisons to avoid precision issues like
//! `1.0/3.0 * 3.0 != 1.0`.

use num_complex::Complex64;

/// Default tolerance for floating-point comparisons
pub(crate) const FLOAT_TOLERANCE: f64 = 1e-10;

#[inline]
pub(crate) fn is_zero_complex(z: Complex64) -> bool {
    z.norm() < FLOAT_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_zero() {
        assert!(is_zero_complex(Complex64::new(1e-12, -1e-12)));
        assert!(!is_zero_complex(Complex64::new(0.0, 1e-3)));
    }
}

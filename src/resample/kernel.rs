//! Lanczos windowed-sinc kernel.

use std::f32::consts::PI;

/// Normalized sinc, `sin(πx)/(πx)` with the removable singularity at zero filled in.
#[inline]
pub fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        return 1.0;
    }
    let pi_x = PI * x;
    pi_x.sin() / pi_x
}

/// Lanczos kernel of half-width `a` evaluated at offset `x`.
///
/// The support is the open interval `(-a, a)`; the kernel is zero on and
/// beyond its boundary.
#[inline]
pub fn lanczos(x: f32, a: f32) -> f32 {
    if -a < x && x < a {
        sinc(x) * sinc(x / a)
    } else {
        0.0
    }
}

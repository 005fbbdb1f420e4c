#![allow(dead_code)]

pub mod lanczos_env;
pub mod wav;

use std::f32::consts::TAU;

/// `len` samples of a sine with `cycles` periods, sampled at pixel centers.
pub fn centered_sine(len: usize, cycles: f32) -> Vec<f32> {
    (0..len)
        .map(|i| (TAU * cycles * (i as f32 + 0.5) / len as f32).sin())
        .collect()
}

pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

pub fn assert_all_close(got: &[f32], expected: f32, tol: f32) {
    for (i, value) in got.iter().enumerate() {
        assert!(
            (value - expected).abs() <= tol,
            "index {i}: {value} differs from {expected} by more than {tol}"
        );
    }
}

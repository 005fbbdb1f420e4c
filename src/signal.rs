//! Synthetic input signals for demos, tests and benchmarks.

use std::f32::consts::TAU;

use rand::Rng;

/// Ten-sample reference signal used by the `pair` demo.
pub const PAIR_SOURCE: [f32; 10] = [0.1, 0.3, 0.4, 0.3, 0.2, 0.4, 0.6, 0.8, 0.9, 0.7];

/// One full sine period spread over `len` samples, zero at both ends.
pub fn sine_grid(len: usize) -> Vec<f32> {
    if len < 2 {
        return vec![0.0; len];
    }
    let span = (len - 1) as f32;
    (0..len).map(|i| (TAU * i as f32 / span).sin()).collect()
}

/// `count` interleaved `(position, f(position))` records with positions drawn
/// uniformly from `[x0, x1)`.
pub fn scatter<R, F>(rng: &mut R, count: usize, x0: f32, x1: f32, f: F) -> Vec<f32>
where
    R: Rng + ?Sized,
    F: Fn(f32) -> f32,
{
    let mut records = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let x = x0 + (x1 - x0) * rng.random::<f32>();
        records.push(x);
        records.push(f(x));
    }
    records
}

/// `count` records of `sin(x)` at positions uniform in `[0, 2π)`.
pub fn scattered_sine<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<f32> {
    scatter(rng, count, 0.0, TAU, f32::sin)
}

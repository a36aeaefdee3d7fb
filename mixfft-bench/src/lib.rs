//! Shared inputs for the criterion benches.

use mixfft::Complex32;

/// Lengths exercising each kernel: powers of two, smooth composites,
/// a generic prime radix and Bluestein stages.
pub const SIZES: &[usize] = &[64, 256, 1024, 4096, 360, 1000, 3 * 5 * 7 * 9, 2 * 37, 67, 1009, 4099];

pub fn signal(n: usize) -> Vec<Complex32> {
    (0..n)
        .map(|i| {
            let t = i as f32;
            Complex32::new((t * 0.173).sin(), (t * 0.051).cos())
        })
        .collect()
}

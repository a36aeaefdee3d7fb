// Test intent: verifies the split real/imaginary entry point.
use core::f64::consts::PI;

use mixfft::{perform_fft, FftError};

#[test]
fn impulse_spectrum_is_flat() {
    let mut signal = [0.0f64; 8];
    signal[0] = 1.0;
    let mut re = [7.0f64; 8];
    let mut im = [7.0f64; 8];
    perform_fft(&signal, &mut re, &mut im).unwrap();
    assert_eq!(re, [1.0; 8]);
    assert_eq!(im, [0.0; 8]);
}

#[test]
fn one_period_sine_peaks_at_first_and_last_bins() {
    for &n in &[6usize, 10, 12, 16, 21] {
        let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 / n as f64).sin()).collect();
        let mut re = vec![0.0; n];
        let mut im = vec![0.0; n];
        perform_fft(&signal, &mut re, &mut im).unwrap();
        let half = n as f64 / 2.0;
        assert!((im[1] + half).abs() < 1e-9, "n={n}: {}", im[1]);
        assert!((im[n - 1] - half).abs() < 1e-9, "n={n}: {}", im[n - 1]);
        for k in 2..n - 1 {
            assert!(re[k].abs() < 1e-9 && im[k].abs() < 1e-9, "n={n} bin {k}");
        }
        assert!(re[0].abs() < 1e-9);
    }
}

#[test]
fn mismatched_buffers_write_nothing() {
    let signal = [1.0f32, 2.0, 3.0, 4.0];
    let mut re = [-1.0f32; 3];
    let mut im = [-1.0f32; 4];
    assert_eq!(
        perform_fft(&signal, &mut re, &mut im),
        Err(FftError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
    assert_eq!(re, [-1.0; 3]);
    assert_eq!(im, [-1.0; 4]);
}

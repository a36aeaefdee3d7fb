// Test intent: verifies plan output against the reference DFT across radix mixes.
use mixfft::{Complex64, Dft, Direction, Executor, FftPlan};

fn generate_input(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|i| Complex64::new((i as f64 * 0.37).sin() + 0.1 * i as f64, (i * 2 % 7) as f64 - 3.0))
        .collect()
}

fn assert_parity(n: usize, direction: Direction) {
    let input = generate_input(n);
    let plan = FftPlan::<f64>::new(n, direction).unwrap();
    let reference = Dft::<f64>::new(n, direction).unwrap();
    let got = plan.execute(&input).unwrap();
    let want = reference.execute(&input).unwrap();
    let tol = 1e-9 * n as f64;
    for (k, (a, b)) in got.iter().zip(want.iter()).enumerate() {
        assert!(
            (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
            "n={n} {direction:?} bin {k}: {a:?} vs {b:?}"
        );
    }
}

#[test]
fn parity_power_of_two() {
    for &n in &[2usize, 4, 8, 16, 32, 64, 128, 1024] {
        assert_parity(n, Direction::Forward);
        assert_parity(n, Direction::Inverse);
    }
}

#[test]
fn parity_mixed_small_primes() {
    for &n in &[3usize, 5, 6, 9, 10, 12, 15, 20, 25, 27, 30, 45, 60, 100, 120, 360] {
        assert_parity(n, Direction::Forward);
        assert_parity(n, Direction::Inverse);
    }
}

#[test]
fn parity_generic_primes() {
    for &n in &[7usize, 11, 13, 14, 49, 77, 61, 2 * 3 * 5 * 7 * 11] {
        assert_parity(n, Direction::Forward);
        assert_parity(n, Direction::Inverse);
    }
}

#[test]
fn every_length_up_to_64_matches() {
    for n in 1..=64 {
        assert_parity(n, Direction::Forward);
    }
}

#[test]
fn f32_plan_tracks_f64_reference() {
    let n = 96;
    let input = generate_input(n);
    let input32: Vec<mixfft::Complex32> = input
        .iter()
        .map(|c| mixfft::Complex32::new(c.re as f32, c.im as f32))
        .collect();
    let got = FftPlan::<f32>::new(n, Direction::Forward)
        .unwrap()
        .execute(&input32)
        .unwrap();
    let want = Dft::<f64>::new(n, Direction::Forward)
        .unwrap()
        .execute(&input)
        .unwrap();
    for (a, b) in got.iter().zip(&want) {
        assert!((a.re as f64 - b.re).abs() < 1e-2 && (a.im as f64 - b.im).abs() < 1e-2);
    }
}

//! Build plans, run forward and inverse transforms, and use the shared cache.
use mixfft::{perform_fft, Complex32, Direction, Executor, FftPlan};

fn main() -> Result<(), mixfft::FftError> {
    // One-period sine over 12 samples: energy lands in bins 1 and 11.
    let n = 12;
    let signal: Vec<f32> = (0..n)
        .map(|i| (2.0 * std::f32::consts::PI * i as f32 / n as f32).sin())
        .collect();

    let mut real = vec![0.0f32; n];
    let mut imag = vec![0.0f32; n];
    perform_fft(&signal, &mut real, &mut imag)?;
    println!("factors for {n}: {:?}", mixfft::factor::radices(n));
    for (k, (re, im)) in real.iter().zip(&imag).enumerate() {
        println!("bin {k:2}: {re:+.4} {im:+.4}i");
    }

    // Explicit plans: inverse undoes forward.
    let forward = FftPlan::<f32>::new(n, Direction::Forward)?;
    let inverse = FftPlan::<f32>::new(n, Direction::Inverse)?;
    let input: Vec<Complex32> = signal.iter().map(|&x| Complex32::from_real(x)).collect();
    let restored = inverse.execute(&forward.execute(&input)?)?;
    let max_err = restored
        .iter()
        .zip(&input)
        .map(|(a, b)| (a.re - b.re).abs().max((a.im - b.im).abs()))
        .fold(0.0f32, f32::max);
    println!("round-trip max error: {max_err:e}");
    Ok(())
}

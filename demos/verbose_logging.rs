//! Demonstrates enabling verbose logging for mixfft.
use mixfft::{fft_real, plan_forward};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let signal = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    // The first call logs a cache miss and the plan build; the second is silent.
    fft_real(&signal).unwrap();
    let plan = plan_forward::<f32>(signal.len()).unwrap();
    println!("factors: {:?}", plan.factors());
}

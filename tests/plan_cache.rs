// Test intent: verifies shared plan caching, including concurrent first use.
use std::sync::{Arc, Barrier};
use std::thread;

use mixfft::{fft, ifft, plan_forward, plan_inverse, Complex64, Direction, PlanCache};

#[test]
fn shared_cache_reuses_plans() {
    let a = plan_forward::<f32>(210).unwrap();
    let b = plan_forward::<f32>(210).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    let inv = plan_inverse::<f32>(210).unwrap();
    assert!(!Arc::ptr_eq(&a, &inv));
    assert_eq!(inv.direction(), Direction::Inverse);
}

#[test]
fn concurrent_first_use_retains_one_plan() {
    const THREADS: usize = 8;
    let cache = Arc::new(PlanCache::<f64>::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_build(1 << 12, Direction::Forward).unwrap()
            })
        })
        .collect();
    let plans: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for p in &plans[1..] {
        assert!(Arc::ptr_eq(&plans[0], p));
    }
    assert_eq!(cache.len(), 1);
    let cached = cache.get(1 << 12, Direction::Forward).unwrap();
    assert!(Arc::ptr_eq(&plans[0], &cached));
}

#[test]
fn convenience_round_trip() {
    let x: Vec<Complex64> = (0..45).map(|i| Complex64::new(i as f64, -(i as f64) / 3.0)).collect();
    let back = ifft(&fft(&x).unwrap()).unwrap();
    for (a, b) in back.iter().zip(&x) {
        assert!((a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10);
    }
}

#[test]
fn empty_input_is_invalid() {
    assert_eq!(fft::<f32>(&[]).unwrap_err(), mixfft::FftError::InvalidLength);
}

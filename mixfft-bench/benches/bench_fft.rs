use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rustfft::num_complex::Complex as RustComplex;
use rustfft::FftPlanner as RustFftPlanner;

use mixfft::{plan_forward, Complex32, Direction, Executor, FftPlan};
use mixfft_bench::{signal, SIZES};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_build");
    for &n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| FftPlan::<f32>::new(n, Direction::Forward).unwrap());
        });
    }
    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");
    for &n in SIZES {
        let input = signal(n);
        let mut output = vec![Complex32::zero(); n];

        let plan = plan_forward::<f32>(n).unwrap();
        group.bench_with_input(BenchmarkId::new("mixfft", n), &n, |b, _| {
            b.iter(|| plan.execute_into(&input, &mut output).unwrap());
        });

        let mut planner = RustFftPlanner::<f32>::new();
        let rust = planner.plan_fft_forward(n);
        let rust_input: Vec<RustComplex<f32>> = input.iter().map(|c| RustComplex::new(c.re, c.im)).collect();
        let mut rust_buf = rust_input.clone();
        group.bench_with_input(BenchmarkId::new("rustfft", n), &n, |b, _| {
            b.iter(|| {
                rust_buf.copy_from_slice(&rust_input);
                rust.process(&mut rust_buf);
            });
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let n = 1024;
    let plan = plan_forward::<f32>(n).unwrap();
    for &count in &[1usize, 8, 64] {
        let inputs: Vec<Vec<Complex32>> = (0..count).map(|_| signal(n)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| plan.execute_batch(&inputs).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_execute, bench_batch);
criterion_main!(benches);

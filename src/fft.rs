//! Plan execution.
//!
//! The executor implements the iterative mixed-radix
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm):
//! the input is gathered through the plan's digit-reversal table, then each
//! stage merges `radix` neighbouring sub-transforms using its precomputed
//! twiddles. There is no recursion, so stack use does not depend on the
//! transform length.
//!
//! Forward transforms are un-normalized; inverse transforms scale by `1/N`,
//! so `inverse(forward(x)) == x`.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft_kernels::{butterfly2, butterfly3, butterfly4, butterfly5, butterfly_generic};
use crate::num::{split_into, Complex, Float};
use crate::plan::{Direction, FftPlan, Kernel, Stage};

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// A plan was requested for fewer than one point.
    InvalidLength,
    /// A buffer's length disagrees with the plan.
    LengthMismatch { expected: usize, actual: usize },
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::InvalidLength => f.write_str("transform length must be at least 1"),
            FftError::LengthMismatch { expected, actual } => {
                write!(f, "buffer length {actual} does not match plan length {expected}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

#[inline]
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), FftError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FftError::LengthMismatch { expected, actual })
    }
}

/// Per-call workspace for the kernels that cannot run on stack arrays.
pub(crate) struct Scratch<T: Float> {
    gathered: Vec<Complex<T>>,
    out: Vec<Complex<T>>,
    conv_a: Vec<Complex<T>>,
    conv_b: Vec<Complex<T>>,
}

impl<T: Float> Scratch<T> {
    pub(crate) fn empty() -> Self {
        Self {
            gathered: Vec::new(),
            out: Vec::new(),
            conv_a: Vec::new(),
            conv_b: Vec::new(),
        }
    }

    pub(crate) fn for_plan(plan: &FftPlan<T>) -> Self {
        let (radix, conv) = plan.scratch_sizes();
        Self {
            gathered: vec![Complex::zero(); radix],
            out: vec![Complex::zero(); radix],
            conv_a: vec![Complex::zero(); conv],
            conv_b: vec![Complex::zero(); conv],
        }
    }
}

/// Start index of every column a stage processes, with its column number.
#[inline]
fn columns(len: usize, radix: usize, span: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len)
        .step_by(radix * span)
        .flat_map(move |base| (0..span).map(move |k| (base + k, k)))
}

#[inline(always)]
fn load<T: Float, const P: usize>(
    buf: &[Complex<T>],
    start: usize,
    span: usize,
    tw: &[Complex<T>],
) -> [Complex<T>; P] {
    let mut a = [Complex::zero(); P];
    a[0] = buf[start];
    for j in 1..P {
        a[j] = buf[start + j * span] * tw[j - 1];
    }
    a
}

#[inline(always)]
fn store<T: Float, const P: usize>(buf: &mut [Complex<T>], start: usize, span: usize, out: [Complex<T>; P]) {
    for (j, v) in out.into_iter().enumerate() {
        buf[start + j * span] = v;
    }
}

fn run_stage<T: Float>(stage: &Stage<T>, buf: &mut [Complex<T>], scratch: &mut Scratch<T>, inverse: bool) {
    let (p, m, n) = (stage.radix, stage.span, buf.len());
    match &stage.kernel {
        Kernel::Radix2 => {
            for (start, k) in columns(n, p, m) {
                let a = load::<T, 2>(buf, start, m, stage.column_twiddles(k));
                store(buf, start, m, butterfly2(a));
            }
        }
        Kernel::Radix3 { w1 } => {
            for (start, k) in columns(n, p, m) {
                let a = load::<T, 3>(buf, start, m, stage.column_twiddles(k));
                store(buf, start, m, butterfly3(a, *w1));
            }
        }
        Kernel::Radix4 => {
            for (start, k) in columns(n, p, m) {
                let a = load::<T, 4>(buf, start, m, stage.column_twiddles(k));
                store(buf, start, m, butterfly4(a, inverse));
            }
        }
        Kernel::Radix5 { w1, w2 } => {
            for (start, k) in columns(n, p, m) {
                let a = load::<T, 5>(buf, start, m, stage.column_twiddles(k));
                store(buf, start, m, butterfly5(a, *w1, *w2));
            }
        }
        Kernel::Generic { roots } => {
            let (gathered, out) = (&mut scratch.gathered[..p], &mut scratch.out[..p]);
            for (start, k) in columns(n, p, m) {
                gather(buf, start, m, stage.column_twiddles(k), gathered);
                butterfly_generic(gathered, roots, out);
                for (j, &v) in out.iter().enumerate() {
                    buf[start + j * m] = v;
                }
            }
        }
        Kernel::Bluestein(kernel) => {
            let Scratch {
                gathered,
                conv_a,
                conv_b,
                ..
            } = scratch;
            let values = &mut gathered[..p];
            for (start, k) in columns(n, p, m) {
                gather(buf, start, m, stage.column_twiddles(k), values);
                kernel.apply(values, conv_a, conv_b);
                for (j, &v) in values.iter().enumerate() {
                    buf[start + j * m] = v;
                }
            }
        }
    }
}

#[inline]
fn gather<T: Float>(buf: &[Complex<T>], start: usize, span: usize, tw: &[Complex<T>], dst: &mut [Complex<T>]) {
    dst[0] = buf[start];
    for (j, (slot, &w)) in dst[1..].iter_mut().zip(tw).enumerate() {
        *slot = buf[start + (j + 1) * span] * w;
    }
}

fn run_stages<T: Float>(plan: &FftPlan<T>, output: &mut [Complex<T>], scratch: &mut Scratch<T>) {
    let inverse = plan.direction().is_inverse();
    for stage in &plan.stages {
        run_stage(stage, output, scratch, inverse);
    }
    if inverse {
        for c in output.iter_mut() {
            *c = c.scale(plan.scale);
        }
    }
}

/// Unchecked core: lengths must already equal `plan.len()`.
pub(crate) fn transform_into<T: Float>(
    plan: &FftPlan<T>,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    scratch: &mut Scratch<T>,
) {
    debug_assert_eq!(input.len(), plan.len());
    debug_assert_eq!(output.len(), plan.len());
    for (slot, &src) in output.iter_mut().zip(&plan.permutation) {
        *slot = input[src];
    }
    run_stages(plan, output, scratch);
}

fn transform_real_into<T: Float>(plan: &FftPlan<T>, input: &[T], output: &mut [Complex<T>], scratch: &mut Scratch<T>) {
    debug_assert_eq!(input.len(), plan.len());
    debug_assert_eq!(output.len(), plan.len());
    for (slot, &src) in output.iter_mut().zip(&plan.permutation) {
        *slot = Complex::from_real(input[src]);
    }
    run_stages(plan, output, scratch);
}

/// A fixed-length transform. Implemented by [`FftPlan`] and by the
/// reference [`crate::dft::Dft`].
///
/// Every method checks buffer lengths before writing and returns
/// [`FftError::LengthMismatch`] without touching any output on failure.
#[allow(clippy::len_without_is_empty)]
pub trait Executor<T: Float>: Sync {
    fn len(&self) -> usize;

    fn direction(&self) -> Direction;

    /// Transform `input` into the caller's `output` buffer.
    fn execute_into(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError>;

    /// Transform a real signal (zero imaginary parts) into `output`.
    fn execute_real_into(&self, input: &[T], output: &mut [Complex<T>]) -> Result<(), FftError>;

    fn execute(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        check_len(self.len(), input.len())?;
        let mut output = vec![Complex::zero(); self.len()];
        self.execute_into(input, &mut output)?;
        Ok(output)
    }

    fn execute_real(&self, input: &[T]) -> Result<Vec<Complex<T>>, FftError> {
        check_len(self.len(), input.len())?;
        let mut output = vec![Complex::zero(); self.len()];
        self.execute_real_into(input, &mut output)?;
        Ok(output)
    }

    /// Real signal in, split real/imaginary spectrum out.
    fn execute_split(&self, signal: &[T], re: &mut [T], im: &mut [T]) -> Result<(), FftError> {
        for actual in [signal.len(), re.len(), im.len()] {
            check_len(self.len(), actual)?;
        }
        let spectrum = self.execute_real(signal)?;
        split_into(&spectrum, re, im)
    }

    /// Transform every buffer with this one plan. All lengths are checked
    /// before any transform runs.
    fn execute_batch(&self, inputs: &[Vec<Complex<T>>]) -> Result<Vec<Vec<Complex<T>>>, FftError> {
        for input in inputs {
            check_len(self.len(), input.len())?;
        }
        #[cfg(feature = "parallel")]
        {
            if should_parallelize_batch(inputs.len()) {
                return inputs.par_iter().map(|input| self.execute(input)).collect();
            }
        }
        inputs.iter().map(|input| self.execute(input)).collect()
    }
}

impl<T: Float> Executor<T> for FftPlan<T> {
    fn len(&self) -> usize {
        FftPlan::len(self)
    }

    fn direction(&self) -> Direction {
        FftPlan::direction(self)
    }

    fn execute_into(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError> {
        check_len(self.len(), input.len())?;
        check_len(self.len(), output.len())?;
        transform_into(self, input, output, &mut Scratch::for_plan(self));
        Ok(())
    }

    fn execute_real_into(&self, input: &[T], output: &mut [Complex<T>]) -> Result<(), FftError> {
        check_len(self.len(), input.len())?;
        check_len(self.len(), output.len())?;
        transform_real_into(self, input, output, &mut Scratch::for_plan(self));
        Ok(())
    }
}

/// Execute `plan` on a complex sequence, returning a fresh spectrum.
pub fn execute<T: Float>(plan: &FftPlan<T>, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
    plan.execute(input)
}

/// Execute `plan` on a real sequence.
pub fn execute_real<T: Float>(plan: &FftPlan<T>, input: &[T]) -> Result<Vec<Complex<T>>, FftError> {
    plan.execute_real(input)
}

/// Execute `plan` on a real sequence, writing split real/imaginary output.
pub fn execute_split<T: Float>(plan: &FftPlan<T>, signal: &[T], re: &mut [T], im: &mut [T]) -> Result<(), FftError> {
    plan.execute_split(signal, re, im)
}

/// Batch execution: one plan, many buffers.
pub fn batch<T: Float, E: Executor<T>>(plan: &E, inputs: &[Vec<Complex<T>>]) -> Result<Vec<Vec<Complex<T>>>, FftError> {
    plan.execute_batch(inputs)
}

/// Multi-channel execution: one real signal per channel (e.g. audio).
pub fn multi_channel<T: Float, E: Executor<T>>(plan: &E, channels: &[Vec<T>]) -> Result<Vec<Vec<Complex<T>>>, FftError> {
    let inputs: Vec<Vec<Complex<T>>> = channels
        .iter()
        .map(|ch| ch.iter().map(|&x| Complex::from_real(x)).collect())
        .collect();
    plan.execute_batch(&inputs)
}

/// Override for the parallel batch threshold. `0` means no override.
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_THREAD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_ENV: OnceLock<ParallelEnv> = OnceLock::new();

#[cfg(feature = "parallel")]
struct ParallelEnv {
    threshold: usize,
    threads: usize,
}

#[cfg(feature = "parallel")]
fn parallel_env() -> &'static ParallelEnv {
    PARALLEL_ENV.get_or_init(|| {
        let threshold = std::env::var("MIXFFT_PAR_BATCH_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let threads = std::env::var("MIXFFT_PAR_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&t| t != 0)
            .unwrap_or_else(|| num_cpus::get().max(1));
        verbose!("parallel env: threshold={} threads={}", threshold, threads);
        ParallelEnv { threshold, threads }
    })
}

#[cfg(feature = "parallel")]
/// Set the minimum batch size that is transformed in parallel.
///
/// Passing `0` reverts to `MIXFFT_PAR_BATCH_THRESHOLD` or, when that is
/// unset, one buffer per worker thread.
pub fn set_parallel_batch_threshold(threshold: usize) {
    PARALLEL_BATCH_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
}

#[cfg(feature = "parallel")]
/// Override the worker count assumed by the batch heuristic. `0` reverts to
/// `MIXFFT_PAR_THREADS` or the number of CPUs.
pub fn set_parallel_threads(threads: usize) {
    PARALLEL_THREAD_OVERRIDE.store(threads, Ordering::Relaxed);
}

#[cfg(feature = "parallel")]
fn parallel_threads() -> usize {
    match PARALLEL_THREAD_OVERRIDE.load(Ordering::Relaxed) {
        0 => parallel_env().threads,
        t => t,
    }
}

#[cfg(feature = "parallel")]
/// Effective parallel batch threshold after overrides and environment.
pub fn parallel_batch_threshold() -> usize {
    match PARALLEL_BATCH_THRESHOLD_OVERRIDE.load(Ordering::Relaxed) {
        0 => match parallel_env().threshold {
            0 => parallel_threads().max(2),
            t => t,
        },
        t => t,
    }
}

#[cfg(feature = "parallel")]
fn should_parallelize_batch(count: usize) -> bool {
    count >= parallel_batch_threshold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex32;

    #[test]
    fn impulse_gives_flat_spectrum() {
        let plan = FftPlan::<f32>::new(8, Direction::Forward).unwrap();
        let mut input = vec![0.0f32; 8];
        input[0] = 1.0;
        let mut re = vec![0.0f32; 8];
        let mut im = vec![0.0f32; 8];
        plan.execute_split(&input, &mut re, &mut im).unwrap();
        for (r, i) in re.iter().zip(&im) {
            assert!((r - 1.0).abs() < 1e-6, "re = {r}");
            assert!(i.abs() < 1e-6, "im = {i}");
        }
    }

    #[test]
    fn all_ones_concentrates_in_dc() {
        let plan = FftPlan::<f32>::new(12, Direction::Forward).unwrap();
        let out = plan.execute_real(&[1.0; 12]).unwrap();
        assert!((out[0].re - 12.0).abs() < 1e-5);
        for c in &out[1..] {
            assert!(c.re.abs() < 1e-5 && c.im.abs() < 1e-5);
        }
    }

    #[test]
    fn mismatch_leaves_output_untouched() {
        let plan = FftPlan::<f32>::new(4, Direction::Forward).unwrap();
        let input = [Complex32::new(1.0, 0.0); 3];
        let mut output = [Complex32::new(9.0, 9.0); 4];
        assert_eq!(
            plan.execute_into(&input, &mut output),
            Err(FftError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(output.iter().all(|c| *c == Complex32::new(9.0, 9.0)));

        let mut re = [5.0f32; 4];
        let mut im = [5.0f32; 5];
        assert!(plan.execute_split(&[1.0; 4], &mut re, &mut im).is_err());
        assert_eq!(re, [5.0; 4]);
        assert_eq!(im, [5.0; 5]);
    }

    #[test]
    fn batch_rejects_any_bad_buffer_up_front() {
        let plan = FftPlan::<f64>::new(6, Direction::Forward).unwrap();
        let inputs = vec![vec![Complex::zero(); 6], vec![Complex::zero(); 5]];
        assert_eq!(
            plan.execute_batch(&inputs),
            Err(FftError::LengthMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            alloc::format!("{}", FftError::LengthMismatch { expected: 8, actual: 7 }),
            "buffer length 7 does not match plan length 8"
        );
    }
}

//! Plan construction: radix factorization, per-stage twiddle tables and the
//! digit-reversal gather table for one transform length.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::bluestein::Bluestein;
use crate::factor::radices;
use crate::fft::FftError;
use crate::num::{Complex, Float};

/// Prime radices above this size run through a Bluestein convolution
/// instead of the quadratic generic butterfly.
pub const BLUESTEIN_MIN_RADIX: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// `X[k] = sum x[n] exp(-2*pi*i*k*n/N)`, un-normalized.
    #[default]
    Forward,
    /// `x[n] = (1/N) sum X[k] exp(+2*pi*i*k*n/N)`.
    Inverse,
}

impl Direction {
    /// Sign of the exponent.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }

    #[inline]
    pub fn is_inverse(self) -> bool {
        self == Direction::Inverse
    }
}

#[derive(Debug)]
pub(crate) enum Kernel<T: Float> {
    Radix2,
    Radix3 { w1: Complex<T> },
    Radix4,
    Radix5 { w1: Complex<T>, w2: Complex<T> },
    Generic { roots: Vec<Complex<T>> },
    Bluestein(Box<Bluestein<T>>),
}

impl<T: Float> Kernel<T> {
    fn new(radix: usize, direction: Direction) -> Result<Self, FftError> {
        let sign = direction.sign();
        let kernel = match radix {
            2 => Kernel::Radix2,
            3 => Kernel::Radix3 {
                w1: Complex::root_of_unity(1, 3, sign),
            },
            4 => Kernel::Radix4,
            5 => Kernel::Radix5 {
                w1: Complex::root_of_unity(1, 5, sign),
                w2: Complex::root_of_unity(2, 5, sign),
            },
            p if p > BLUESTEIN_MIN_RADIX => Kernel::Bluestein(Box::new(Bluestein::new(p, direction)?)),
            p => Kernel::Generic {
                roots: (0..p).map(|t| Complex::root_of_unity(t, p, sign)).collect(),
            },
        };
        Ok(kernel)
    }
}

/// One combination pass: merges `radix` sub-transforms of length `span`
/// into transforms of length `radix * span`.
#[derive(Debug)]
pub(crate) struct Stage<T: Float> {
    pub(crate) radix: usize,
    pub(crate) span: usize,
    /// `W_L^{j*k}` at `k * (radix - 1) + (j - 1)`, `L = radix * span`.
    pub(crate) twiddles: Vec<Complex<T>>,
    pub(crate) kernel: Kernel<T>,
}

impl<T: Float> Stage<T> {
    fn new(radix: usize, span: usize, direction: Direction) -> Result<Self, FftError> {
        let block = radix * span;
        let sign = direction.sign();
        let mut twiddles = Vec::with_capacity(span * (radix - 1));
        for k in 0..span {
            for j in 1..radix {
                twiddles.push(Complex::root_of_unity(j * k, block, sign));
            }
        }
        Ok(Self {
            radix,
            span,
            twiddles,
            kernel: Kernel::new(radix, direction)?,
        })
    }

    #[inline(always)]
    pub(crate) fn column_twiddles(&self, k: usize) -> &[Complex<T>] {
        let w = self.radix - 1;
        &self.twiddles[k * w..(k + 1) * w]
    }
}

/// Precomputed, immutable description of a transform of one fixed length
/// and direction. Shareable across threads; executing it never mutates it.
#[derive(Debug)]
pub struct FftPlan<T: Float> {
    len: usize,
    direction: Direction,
    factors: Vec<usize>,
    pub(crate) stages: Vec<Stage<T>>,
    /// `buffer[pos] = input[permutation[pos]]`.
    pub(crate) permutation: Vec<usize>,
    pub(crate) scale: T,
}

#[allow(clippy::len_without_is_empty)]
impl<T: Float> FftPlan<T> {
    /// Build a plan for `len` points. Fails with [`FftError::InvalidLength`]
    /// when `len == 0`.
    pub fn new(len: usize, direction: Direction) -> Result<Self, FftError> {
        if len == 0 {
            return Err(FftError::InvalidLength);
        }
        let factors = radices(len);
        let mut stages = Vec::with_capacity(factors.len());
        let mut span = 1usize;
        for &radix in &factors {
            stages.push(Stage::new(radix, span, direction)?);
            span *= radix;
        }
        let permutation = digit_reversal(len, &factors);
        let scale = match direction {
            Direction::Forward => T::one(),
            Direction::Inverse => T::from_f64(1.0 / len as f64),
        };
        verbose!(
            "built {:?} plan: len={} factors={:?}",
            direction,
            len,
            factors
        );
        Ok(Self {
            len,
            direction,
            factors,
            stages,
            permutation,
            scale,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Radices in execution order. Empty for a length-1 plan.
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Twiddle table of the stage at `index`, if any.
    pub fn stage_twiddles(&self, index: usize) -> Option<&[Complex<T>]> {
        self.stages.get(index).map(|s| s.twiddles.as_slice())
    }

    /// Output scaling: 1 forward, `1/len` inverse.
    pub fn scale(&self) -> T {
        self.scale
    }

    /// True when at least one stage evaluates its radix with Bluestein.
    pub fn uses_bluestein(&self) -> bool {
        self.stages
            .iter()
            .any(|s| matches!(s.kernel, Kernel::Bluestein(_)))
    }

    /// Scratch sizes needed to execute: `(largest generic radix,
    /// largest convolution length)`.
    pub(crate) fn scratch_sizes(&self) -> (usize, usize) {
        self.stages.iter().fold((0, 0), |(radix, conv), stage| match &stage.kernel {
            Kernel::Generic { .. } => (radix.max(stage.radix), conv),
            Kernel::Bluestein(b) => (radix.max(stage.radix), conv.max(b.conv_len())),
            _ => (radix, conv),
        })
    }
}

/// Build a plan from any integer length. Zero, negative, or values that do
/// not fit `usize` fail with [`FftError::InvalidLength`].
pub fn build_plan<T: Float, N: TryInto<usize>>(len: N, direction: Direction) -> Result<FftPlan<T>, FftError> {
    let len = len.try_into().map_err(|_| FftError::InvalidLength)?;
    FftPlan::new(len, direction)
}

/// Generalized digit reversal: where each input index lands before the
/// first stage. With every radix equal to 2 this is bit reversal.
fn digit_reversal(len: usize, factors: &[usize]) -> Vec<usize> {
    let mut table = vec![0usize; len];
    for i in 0..len {
        let mut rem = i;
        let mut block = len;
        let mut pos = 0usize;
        for &radix in factors.iter().rev() {
            block /= radix;
            pos += (rem % radix) * block;
            rem /= radix;
        }
        table[pos] = i;
    }
    table
}

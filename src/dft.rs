//! Reference O(N^2) discrete Fourier transform.
//!
//! Same sign and normalization convention as [`crate::FftPlan`]; used as an
//! oracle in tests and benches.

use alloc::vec::Vec;

use crate::fft::{check_len, Executor, FftError};
use crate::fft_kernels::butterfly_generic;
use crate::num::{Complex, Float};
use crate::plan::Direction;

#[derive(Debug, Clone)]
pub struct Dft<T: Float> {
    direction: Direction,
    /// `W_N^t` for `t in 0..N`.
    roots: Vec<Complex<T>>,
    scale: T,
}

impl<T: Float> Dft<T> {
    pub fn new(len: usize, direction: Direction) -> Result<Self, FftError> {
        if len == 0 {
            return Err(FftError::InvalidLength);
        }
        let roots = (0..len)
            .map(|t| Complex::root_of_unity(t, len, direction.sign()))
            .collect();
        let scale = match direction {
            Direction::Forward => T::one(),
            Direction::Inverse => T::from_f64(1.0 / len as f64),
        };
        Ok(Self {
            direction,
            roots,
            scale,
        })
    }
}

impl<T: Float> Executor<T> for Dft<T> {
    fn len(&self) -> usize {
        self.roots.len()
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn execute_into(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError> {
        check_len(self.len(), input.len())?;
        check_len(self.len(), output.len())?;
        butterfly_generic(input, &self.roots, output);
        if self.direction.is_inverse() {
            for c in output.iter_mut() {
                *c = c.scale(self.scale);
            }
        }
        Ok(())
    }

    fn execute_real_into(&self, input: &[T], output: &mut [Complex<T>]) -> Result<(), FftError> {
        check_len(self.len(), input.len())?;
        let complex: Vec<Complex<T>> = input.iter().map(|&x| Complex::from_real(x)).collect();
        self.execute_into(&complex, output)
    }
}

//! Bluestein (chirp-z) evaluation of a large prime radix as a power-of-two
//! cyclic convolution.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{transform_into, FftError, Scratch};
use crate::num::{Complex, Float};
use crate::plan::{Direction, FftPlan};

#[derive(Debug)]
pub(crate) struct Bluestein<T: Float> {
    /// `c_j = exp(sign * pi*i * j^2 / p)`.
    chirp: Vec<Complex<T>>,
    /// Forward transform of the conjugate chirp, wrapped to `conv_len`.
    kernel: Vec<Complex<T>>,
    forward: FftPlan<T>,
    inverse: FftPlan<T>,
}

impl<T: Float> Bluestein<T> {
    pub(crate) fn new(len: usize, direction: Direction) -> Result<Self, FftError> {
        let conv_len = (2 * len - 1).next_power_of_two();
        let sign = direction.sign();
        let twice = 2 * len as u128;
        let chirp: Vec<Complex<T>> = (0..len)
            .map(|j| {
                let sq = (j as u128 * j as u128) % twice;
                Complex::root_of_unity(sq as usize, 2 * len, sign)
            })
            .collect();

        let mut wrapped = vec![Complex::zero(); conv_len];
        wrapped[0] = chirp[0].conj();
        for t in 1..len {
            wrapped[t] = chirp[t].conj();
            wrapped[conv_len - t] = chirp[t].conj();
        }

        let forward = FftPlan::new(conv_len, Direction::Forward)?;
        let inverse = FftPlan::new(conv_len, Direction::Inverse)?;
        let mut kernel = vec![Complex::zero(); conv_len];
        transform_into(&forward, &wrapped, &mut kernel, &mut Scratch::empty());
        Ok(Self {
            chirp,
            kernel,
            forward,
            inverse,
        })
    }

    pub(crate) fn conv_len(&self) -> usize {
        self.kernel.len()
    }

    /// Replace `values` (length `p`) with their `p`-point DFT. `conv_a` and
    /// `conv_b` are workspaces of at least [`Self::conv_len`] points.
    pub(crate) fn apply(&self, values: &mut [Complex<T>], conv_a: &mut [Complex<T>], conv_b: &mut [Complex<T>]) {
        let m = self.conv_len();
        let (a, b) = (&mut conv_a[..m], &mut conv_b[..m]);
        for (j, slot) in a.iter_mut().enumerate() {
            *slot = match (values.get(j), self.chirp.get(j)) {
                (Some(&x), Some(&c)) => x * c,
                _ => Complex::zero(),
            };
        }
        // Power-of-two sub-plans never need generic or convolution scratch.
        let mut none = Scratch::empty();
        transform_into(&self.forward, a, b, &mut none);
        for (x, &k) in b.iter_mut().zip(&self.kernel) {
            *x = *x * k;
        }
        transform_into(&self.inverse, b, a, &mut none);
        for ((out, &conv), &c) in values.iter_mut().zip(a.iter()).zip(&self.chirp) {
            *out = conv * c;
        }
    }
}

//! Numeric primitives: the [`Float`] abstraction and the [`Complex`] value
//! the planner and executor are generic over.

use alloc::vec::Vec;

use crate::fft::FftError;

/// Minimal float trait for the transform engine.
///
/// Transcendental functions go through `libm` so the crate builds without
/// `std`. Twiddle factors are always evaluated in `f64` and narrowed with
/// [`Float::from_f64`], so implementors only need plain arithmetic here.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
}

impl Float for f32 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }
    #[inline(always)]
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
}

impl Float for f64 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }
    #[inline(always)]
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Default for Complex<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Float> Complex<T> {
    #[inline(always)]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }

    /// A purely real value.
    #[inline(always)]
    pub fn from_real(re: T) -> Self {
        Self { re, im: T::zero() }
    }

    /// `exp(i * theta)`, evaluated in `f64`.
    pub fn expi(theta: f64) -> Self {
        let (sin, cos) = libm::sincos(theta);
        Self {
            re: T::from_f64(cos),
            im: T::from_f64(sin),
        }
    }

    /// `exp(sign * 2*pi*i * num / den)` with `num` reduced modulo `den`
    /// before the angle is formed, so large indices keep full precision.
    pub fn root_of_unity(num: usize, den: usize, sign: f64) -> Self {
        let reduced = (num as u128 % den as u128) as f64;
        Self::expi(sign * 2.0 * core::f64::consts::PI * reduced / den as f64)
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re.mul_add(self.re, self.im * self.im)
    }

    /// Magnitude `|z|`.
    pub fn norm(self) -> T {
        self.norm_sqr().sqrt()
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl<T: Float> core::ops::AddAssign for Complex<T> {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        self.re = self.re + other.re;
        self.im = self.im + other.im;
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re.mul_add(other.re, -(self.im * other.im)),
            im: self.re.mul_add(other.im, self.im * other.re),
        }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Copy an interleaved spectrum into separate real and imaginary buffers.
///
/// All three lengths are checked before either buffer is written.
pub fn split_into<T: Float>(input: &[Complex<T>], re: &mut [T], im: &mut [T]) -> Result<(), FftError> {
    for actual in [re.len(), im.len()] {
        if actual != input.len() {
            return Err(FftError::LengthMismatch {
                expected: input.len(),
                actual,
            });
        }
    }
    for ((c, r), i) in input.iter().zip(re.iter_mut()).zip(im.iter_mut()) {
        *r = c.re;
        *i = c.im;
    }
    Ok(())
}

/// Magnitude of every bin.
pub fn magnitudes<T: Float>(spectrum: &[Complex<T>]) -> Vec<T> {
    spectrum.iter().map(|c| c.norm()).collect()
}

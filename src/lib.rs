//! # mixfft - mixed-radix FFT engine
//!
//! A self-contained discrete Fourier transform engine for arbitrary lengths.
//! A plan is built once per length and direction, then executed against any
//! number of buffers of that length, from any number of threads.
//!
//! ## Features
//!
//! - **Any length N >= 1**: radix-2/3/4/5 butterflies, a generic prime
//!   butterfly, and Bluestein stages for large prime factors
//! - **Immutable plans**: twiddle tables and digit-reversal permutation are
//!   computed once; plans are `Send + Sync` and shareable through `Arc`
//! - **Iterative execution**: no recursion, stack use independent of N
//! - **Shared plan cache** keyed by length and direction (`std`)
//! - **Batch execution**, optionally parallel with Rayon
//!
//! ## Cargo Features
//!
//! - `std` (default): shared plan cache and `std::error::Error`
//! - `parallel`: Rayon batch execution
//! - `verbose-logging`: plan and cache events through the `log` facade
//!
//! ## Conventions
//!
//! Forward transforms are un-normalized,
//! `X[k] = sum_n x[n] exp(-2*pi*i*k*n/N)`. Inverse transforms use the
//! opposite sign and scale by `1/N`, so an inverse of a forward transform
//! returns the original sequence.
//!
//! ## Example
//!
//! ```
//! use mixfft::{Direction, Executor, FftPlan};
//!
//! let plan = FftPlan::<f32>::new(8, Direction::Forward).unwrap();
//! let mut re = [0.0f32; 8];
//! let mut im = [0.0f32; 8];
//! plan.execute_split(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], &mut re, &mut im)
//!     .unwrap();
//! assert!(re.iter().all(|&r| (r - 1.0).abs() < 1e-6));
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

/// Debug-level record through `log`, compiled out unless the
/// `verbose-logging` feature is enabled.
macro_rules! verbose {
    ($($arg:tt)+) => {
        #[cfg(feature = "verbose-logging")]
        log::debug!($($arg)+);
    };
}

/// Numeric primitives
///
/// `Float` abstraction over `f32`/`f64` and the `Complex` value type.
pub mod num;

/// Prime factorization and radix ordering.
pub mod factor;

/// Radix butterflies used by every stage.
pub mod fft_kernels;

/// Plan Builder
///
/// Factorization, twiddle tables and digit-reversal permutation for one length.
pub mod plan;

mod bluestein;

/// Executor
///
/// Runs a plan against input buffers; error type and batch helpers.
pub mod fft;

/// Reference O(N^2) DFT with the same conventions as the plans.
pub mod dft;

/// Shared plan cache and the process-wide convenience API.
#[cfg(feature = "std")]
pub mod cache;

pub use dft::Dft;
pub use fft::{execute, execute_real, execute_split, Executor, FftError};
pub use num::{magnitudes, split_into, Complex, Complex32, Complex64, Float};
pub use plan::{build_plan, Direction, FftPlan};

#[cfg(feature = "std")]
pub use cache::{fft, fft_real, ifft, perform_fft, plan_forward, plan_inverse, PlanCache, SharedPlans};

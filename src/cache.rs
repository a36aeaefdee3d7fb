//! Concurrency-safe plan cache and the process-wide convenience API.
//!
//! Lookups take a read lock. A miss builds the plan with no lock held, then
//! inserts it under the write lock only if the key is still absent. When two
//! threads race on one key the first insert wins; the other thread drops its
//! redundant plan and returns the winner, so exactly one plan is retained per
//! `(len, direction)`.

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{OnceLock, PoisonError, RwLock};

use hashbrown::HashMap;

use crate::fft::{check_len, Executor, FftError};
use crate::num::{Complex, Float};
use crate::plan::{Direction, FftPlan};

type PlanKey = (usize, Direction);

#[derive(Debug)]
pub struct PlanCache<T: Float> {
    plans: RwLock<HashMap<PlanKey, Arc<FftPlan<T>>>>,
}

impl<T: Float> Default for PlanCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PlanCache<T> {
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
        }
    }

    /// Cached plan for `(len, direction)`, if one has been built.
    pub fn get(&self, len: usize, direction: Direction) -> Option<Arc<FftPlan<T>>> {
        // Plans are immutable, so a poisoned lock still guards valid data.
        let plans = self.plans.read().unwrap_or_else(PoisonError::into_inner);
        plans.get(&(len, direction)).cloned()
    }

    /// Return the cached plan, building and inserting it on first use.
    pub fn get_or_build(&self, len: usize, direction: Direction) -> Result<Arc<FftPlan<T>>, FftError> {
        if let Some(plan) = self.get(len, direction) {
            return Ok(plan);
        }
        verbose!("plan cache miss: len={} {:?}", len, direction);
        let built = Arc::new(FftPlan::new(len, direction)?);
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        let winner = plans
            .entry((len, direction))
            .or_insert_with(|| Arc::clone(&built));
        #[cfg(feature = "verbose-logging")]
        if !Arc::ptr_eq(winner, &built) {
            log::debug!("plan cache race lost: len={} {:?}, dropping duplicate", len, direction);
        }
        Ok(Arc::clone(winner))
    }

    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached plan. Plans still held by callers stay alive.
    pub fn clear(&self) {
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Float types with a process-wide [`PlanCache`].
pub trait SharedPlans: Float {
    fn shared_cache() -> &'static PlanCache<Self>;
}

impl SharedPlans for f32 {
    fn shared_cache() -> &'static PlanCache<f32> {
        static CACHE: OnceLock<PlanCache<f32>> = OnceLock::new();
        CACHE.get_or_init(PlanCache::new)
    }
}

impl SharedPlans for f64 {
    fn shared_cache() -> &'static PlanCache<f64> {
        static CACHE: OnceLock<PlanCache<f64>> = OnceLock::new();
        CACHE.get_or_init(PlanCache::new)
    }
}

/// Shared forward plan for `len` points.
pub fn plan_forward<T: SharedPlans>(len: usize) -> Result<Arc<FftPlan<T>>, FftError> {
    T::shared_cache().get_or_build(len, Direction::Forward)
}

/// Shared inverse plan for `len` points.
pub fn plan_inverse<T: SharedPlans>(len: usize) -> Result<Arc<FftPlan<T>>, FftError> {
    T::shared_cache().get_or_build(len, Direction::Inverse)
}

/// Forward transform of a complex sequence using the shared cache.
pub fn fft<T: SharedPlans>(input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
    plan_forward::<T>(input.len())?.execute(input)
}

/// Inverse transform (scaled by `1/N`) using the shared cache.
pub fn ifft<T: SharedPlans>(input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
    plan_inverse::<T>(input.len())?.execute(input)
}

/// Forward transform of a real sequence using the shared cache.
pub fn fft_real<T: SharedPlans>(input: &[T]) -> Result<Vec<Complex<T>>, FftError> {
    plan_forward::<T>(input.len())?.execute_real(input)
}

/// Forward transform of `signal` into split `real`/`imag` buffers of the
/// same length. Nothing is written unless all three lengths agree and the
/// signal is non-empty.
pub fn perform_fft<T: SharedPlans>(signal: &[T], real: &mut [T], imag: &mut [T]) -> Result<(), FftError> {
    for actual in [real.len(), imag.len()] {
        check_len(signal.len(), actual)?;
    }
    plan_forward::<T>(signal.len())?.execute_split(signal, real, imag)
}

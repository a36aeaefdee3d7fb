//! Prime factorization and radix ordering for mixed-radix plans.

use alloc::vec::Vec;

/// Prime factors of `n` in non-decreasing order. `factorize(1)` is empty.
pub fn factorize(mut n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    for &p in &[2, 3, 5] {
        while n > 1 && n % p == 0 {
            factors.push(p);
            n /= p;
        }
    }
    let mut f = 7;
    while f <= n / f {
        while n % f == 0 {
            factors.push(f);
            n /= f;
        }
        f += 2;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Radix sequence in execution order (first stage first).
///
/// Pairs of 2 become radix 4; a leftover 2 runs right after the 4s, then
/// the odd primes ascending. The product always equals `n`.
pub fn radices(n: usize) -> Vec<usize> {
    let primes = factorize(n);
    let twos = primes.iter().take_while(|&&p| p == 2).count();
    let mut out = Vec::with_capacity(primes.len());
    out.extend(core::iter::repeat(4).take(twos / 2));
    if twos % 2 == 1 {
        out.push(2);
    }
    out.extend_from_slice(&primes[twos..]);
    out
}

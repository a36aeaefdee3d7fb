//! Radix butterflies. Inputs are the gathered, already twiddled values of
//! one sub-transform column; outputs are in natural order.

use crate::num::{Complex, Float};

/// Multiply by `-i` (forward) or `+i` (inverse).
#[inline(always)]
fn rotate_quarter<T: Float>(x: Complex<T>, inverse: bool) -> Complex<T> {
    if inverse {
        Complex::new(-x.im, x.re)
    } else {
        Complex::new(x.im, -x.re)
    }
}

#[inline(always)]
pub fn butterfly2<T: Float>([a0, a1]: [Complex<T>; 2]) -> [Complex<T>; 2] {
    [a0 + a1, a0 - a1]
}

/// `w1` is the stage's first root of unity, `exp(-+2*pi*i/3)`.
#[inline(always)]
pub fn butterfly3<T: Float>([a0, a1, a2]: [Complex<T>; 3], w1: Complex<T>) -> [Complex<T>; 3] {
    let sum = a1 + a2;
    let diff = a1 - a2;
    let mid = a0 + sum.scale(w1.re);
    // i * w1.im * diff
    let rot = Complex::new(-(w1.im * diff.im), w1.im * diff.re);
    [a0 + sum, mid + rot, mid - rot]
}

#[inline(always)]
pub fn butterfly4<T: Float>([a0, a1, a2, a3]: [Complex<T>; 4], inverse: bool) -> [Complex<T>; 4] {
    let t0 = a0 + a2;
    let t1 = a0 - a2;
    let t2 = a1 + a3;
    let t3 = rotate_quarter(a1 - a3, inverse);
    [t0 + t2, t1 + t3, t0 - t2, t1 - t3]
}

/// `w1`, `w2` are the stage's first two roots of unity.
#[inline(always)]
pub fn butterfly5<T: Float>(
    [a0, a1, a2, a3, a4]: [Complex<T>; 5],
    w1: Complex<T>,
    w2: Complex<T>,
) -> [Complex<T>; 5] {
    let b1 = a1 + a4;
    let b2 = a2 + a3;
    let d1 = a1 - a4;
    let d2 = a2 - a3;

    let m1 = a0 + b1.scale(w1.re) + b2.scale(w2.re);
    let m2 = a0 + b1.scale(w2.re) + b2.scale(w1.re);
    // Imaginary parts of the symmetric pairs, before the factor of i.
    let s1 = d1.scale(w1.im) + d2.scale(w2.im);
    let s2 = d1.scale(w2.im) - d2.scale(w1.im);
    let r1 = Complex::new(-s1.im, s1.re);
    let r2 = Complex::new(-s2.im, s2.re);

    [a0 + b1 + b2, m1 + r1, m2 + r2, m2 - r2, m1 - r1]
}

/// Direct `p`-point DFT for prime radices without a dedicated kernel.
///
/// `roots[t]` holds `W_p^t` for `t in 0..p`; `out` must have the same length
/// as `input`.
pub fn butterfly_generic<T: Float>(input: &[Complex<T>], roots: &[Complex<T>], out: &mut [Complex<T>]) {
    let p = input.len();
    debug_assert_eq!(roots.len(), p);
    debug_assert_eq!(out.len(), p);
    for (s, slot) in out.iter_mut().enumerate() {
        let mut acc = input[0];
        let mut idx = 0usize;
        for &x in &input[1..] {
            idx += s;
            if idx >= p {
                idx -= p;
            }
            acc += x * roots[idx];
        }
        *slot = acc;
    }
}

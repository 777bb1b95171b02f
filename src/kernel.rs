//! Elementwise kernels over parallel typed buffers.
//!
//! Pure slice-level routines: they never allocate, destination storage is
//! always provided by the caller, and every operation is defined per index
//! with no cross-index dependency. Length agreement is a caller precondition
//! enforced with assertions here; the container layers validate shapes first
//! and surface [`crate::error::MpsnumError`] values, so through the public
//! container API these assertions are unreachable.
//!
//! The `par_` variants split the destination into disjoint chunks and hand
//! them to rayon workers; sources are only ever read, so the parallel
//! kernels compute exactly what the sequential ones do.

use num::Zero;
use rayon::prelude::*;

use crate::Real;

/// Number of elements each rayon task works on. Large enough that a task
/// amortizes its scheduling cost, small enough to spread a per-particle
/// field over the worker pool.
const PAR_CHUNK: usize = 4096;

/// Overwrites every element with the numeric zero of its kind.
pub fn fill_zero<T: Copy + Zero>(dst: &mut [T]) {
    dst.fill(T::zero());
}

/// Copies `src` into `dst` element for element.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn copy<T: Copy>(src: &[T], dst: &mut [T]) {
    assert_eq!(src.len(), dst.len(), "buffers must be the same length");
    dst.copy_from_slice(src);
}

/// `dst[i] = a[i] + b[i]` for every index.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn add(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x + y;
    }
}

/// `dst[i] = a[i] - b[i]` for every index.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn sub(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x - y;
    }
}

/// `dst[i] = a[i] * b[i]` for every index.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn mul(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x * y;
    }
}

/// `dst[i] = a[i] / b[i]` for every index.
///
/// Division by zero follows IEEE-754: the result is a signed infinity or
/// NaN, never an error. Callers needing guarded division must check the
/// divisors themselves.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn div(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x / y;
    }
}

/// Parallel [`add`]: disjoint destination chunks per rayon worker.
pub fn par_add(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    dst.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .zip(b.par_chunks(PAR_CHUNK))
        .for_each(|((d, a), b)| add(a, b, d));
}

/// Parallel [`sub`]: disjoint destination chunks per rayon worker.
pub fn par_sub(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    dst.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .zip(b.par_chunks(PAR_CHUNK))
        .for_each(|((d, a), b)| sub(a, b, d));
}

/// Parallel [`mul`]: disjoint destination chunks per rayon worker.
pub fn par_mul(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    dst.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .zip(b.par_chunks(PAR_CHUNK))
        .for_each(|((d, a), b)| mul(a, b, d));
}

/// Parallel [`div`]: disjoint destination chunks per rayon worker.
pub fn par_div(a: &[Real], b: &[Real], dst: &mut [Real]) {
    assert_eq!(a.len(), b.len(), "operands must be the same length");
    assert_eq!(a.len(), dst.len(), "destination must match operand length");

    dst.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .zip(b.par_chunks(PAR_CHUNK))
        .for_each(|((d, a), b)| div(a, b, d));
}

/// `dst[k] = src[index[k]]` for every k.
///
/// # Panics
///
/// Panics if `index` and `dst` differ in length, or if any listed index is
/// not a valid position in `src`.
pub fn gather<T: Copy>(src: &[T], index: &[usize], dst: &mut [T]) {
    assert_eq!(index.len(), dst.len(), "index list must match destination length");

    for (d, &i) in dst.iter_mut().zip(index) {
        *d = src[i];
    }
}

/// `dst[index[k]] = src[k]` for every k.
///
/// # Panics
///
/// Panics if `index` and `src` differ in length, or if any listed index is
/// not a valid position in `dst`.
pub fn scatter<T: Copy>(src: &[T], index: &[usize], dst: &mut [T]) {
    assert_eq!(index.len(), src.len(), "index list must match source length");

    for (&v, &i) in src.iter().zip(index) {
        dst[i] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_mul_div() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let mut out = [0.0; 3];

        add(&a, &b, &mut out);
        assert_eq!(out, [5.0, 7.0, 9.0]);

        sub(&a, &b, &mut out);
        assert_eq!(out, [-3.0, -3.0, -3.0]);

        mul(&a, &b, &mut out);
        assert_eq!(out, [4.0, 10.0, 18.0]);

        div(&a, &b, &mut out);
        assert_eq!(out, [0.25, 0.4, 0.5]);
    }

    #[test]
    fn test_div_by_zero_propagates_ieee_values() {
        let a = [1.0, -1.0, 0.0];
        let b = [0.0, 0.0, 0.0];
        let mut out = [0.0; 3];

        div(&a, &b, &mut out);
        assert_eq!(out[0], f64::INFINITY);
        assert_eq!(out[1], f64::NEG_INFINITY);
        assert!(out[2].is_nan());
    }

    #[test]
    fn test_parallel_kernels_match_sequential() {
        let n = 3 * PAR_CHUNK + 17; // force several chunks plus a remainder
        let a: Vec<Real> = (0..n).map(|i| i as Real).collect();
        let b: Vec<Real> = (0..n).map(|i| (2 * i + 1) as Real).collect();

        let mut seq = vec![0.0; n];
        let mut par = vec![0.0; n];

        add(&a, &b, &mut seq);
        par_add(&a, &b, &mut par);
        assert_eq!(seq, par, "par_add must agree with add");

        sub(&a, &b, &mut seq);
        par_sub(&a, &b, &mut par);
        assert_eq!(seq, par, "par_sub must agree with sub");

        mul(&a, &b, &mut seq);
        par_mul(&a, &b, &mut par);
        assert_eq!(seq, par, "par_mul must agree with mul");

        div(&a, &b, &mut seq);
        par_div(&a, &b, &mut par);
        assert_eq!(seq, par, "par_div must agree with div");
    }

    #[test]
    fn test_fill_zero_and_copy() {
        let mut data = [7.0, 8.0, 9.0];
        fill_zero(&mut data);
        assert_eq!(data, [0.0; 3]);

        let src = [1.0, 2.0, 3.0];
        copy(&src, &mut data);
        assert_eq!(data, src);
    }

    #[test]
    fn test_gather_scatter_round_trip() {
        let src = [10.0, 20.0, 30.0, 40.0];
        let index = [3, 0, 2];
        let mut picked = [0.0; 3];

        gather(&src, &index, &mut picked);
        assert_eq!(picked, [40.0, 10.0, 30.0]);

        let mut rebuilt = [0.0; 4];
        scatter(&picked, &index, &mut rebuilt);
        assert_eq!(rebuilt, [10.0, 0.0, 30.0, 40.0]);
    }

    #[test]
    #[should_panic(expected = "operands must be the same length")]
    fn test_mismatched_kernel_lengths_panic() {
        let a = [1.0, 2.0];
        let b = [1.0];
        let mut out = [0.0; 2];
        add(&a, &b, &mut out);
    }
}

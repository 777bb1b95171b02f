//! Owned, contiguous, zero-initialized numeric buffers.
//!
//! [`Buffer<T>`] is the single storage primitive every container in the crate
//! is built from: a heap allocation of `len` elements of one numeric kind,
//! requested at the alignment resolved by [`crate::align`] and zero-filled
//! before it is handed out. A buffer has exactly one owner and is never
//! aliased across two live containers; every "view" operation in the crate
//! copies into caller-supplied storage instead.
//!
//! A container moves through three states: it does not exist, it is
//! allocated, or it has been released. [`Buffer::release`] frees the storage
//! and resets the length to zero; releasing again is a no-op, and `Drop`
//! routes through the same path, so double-free is impossible by
//! construction. A released buffer is indistinguishable from a zero-length
//! one, which makes any dimensioned operation on it fail the shape checks of
//! the container layer instead of touching freed memory.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use num::Zero;

use crate::align::DEFAULT_ALIGNMENT;
use crate::error::{allocation_error, layout_error, validation_error, Result};
use crate::kernel;
use crate::{Int, Int32, Real};

/// An owned, aligned, contiguous run of `len` elements of `T`.
///
/// Invariant: when `len > 0`, `ptr` addresses exactly
/// `len * size_of::<T>()` bytes allocated with `layout`; a zero-length
/// buffer owns no storage at all.
pub struct Buffer<T> {
    len: usize,
    ptr: NonNull<T>,
    layout: Option<Layout>,
}

impl<T: Copy + Zero> Buffer<T> {
    /// Allocates a buffer of `len` elements, zero-filled, at the crate's
    /// resolved alignment.
    ///
    /// Allocation failure is the one fatal resource condition in the crate:
    /// it is returned as [`MpsnumError::AllocationError`] rather than
    /// aborting, and nothing is left partially constructed. `len == 0`
    /// succeeds without touching the allocator.
    ///
    /// [`MpsnumError::AllocationError`]: crate::error::MpsnumError::AllocationError
    pub fn zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self::empty());
        }

        let align = DEFAULT_ALIGNMENT.max(mem::align_of::<T>());
        let size = len
            .checked_mul(mem::size_of::<T>())
            .ok_or_else(|| layout_error(usize::MAX, align, "buffer byte size overflows usize"))?;
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| layout_error(size, align, "invalid allocation layout"))?;

        // The element kinds stored here (f64, u64, u32) all read the
        // all-zero byte pattern as their numeric zero.
        let ptr = unsafe { alloc_zeroed(layout) as *mut T };

        match NonNull::new(ptr) {
            Some(ptr) => Ok(Buffer {
                len,
                ptr,
                layout: Some(layout),
            }),
            None => Err(allocation_error(size, align, "allocator returned null")),
        }
    }

    /// A buffer that owns no storage. Equivalent to the released state.
    pub fn empty() -> Self {
        Buffer {
            len: 0,
            ptr: NonNull::dangling(),
            layout: None,
        }
    }

    /// Overwrites every element with the numeric zero of its kind.
    pub fn fill_zero(&mut self) {
        kernel::fill_zero(self.as_mut_slice());
    }

    /// Copies every element of `src` into `self`.
    ///
    /// The lengths must match exactly; a released buffer has length zero and
    /// therefore fails this check instead of being written through.
    pub fn copy_from(&mut self, src: &Buffer<T>) -> Result<()> {
        if self.len != src.len {
            return Err(validation_error(format!(
                "length mismatch: destination holds {} elements, source {}",
                self.len, src.len
            )));
        }
        kernel::copy(src.as_slice(), self.as_mut_slice());
        Ok(())
    }
}

impl<T> Buffer<T> {
    /// Number of elements the buffer holds.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements (never allocated, zero-length,
    /// or released).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The elements as a shared slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: when len > 0 the pointer addresses len initialized
        // elements; when len == 0 a dangling pointer is valid for an empty
        // slice.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: same as `as_slice`, plus exclusive access through &mut self.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Frees the owned storage and resets the length to zero.
    ///
    /// Idempotent: releasing an already-released buffer is a no-op, guarded
    /// by the `layout.take()` transition. `Drop` calls this same routine.
    pub fn release(&mut self) {
        if let Some(layout) = self.layout.take() {
            // SAFETY: ptr was allocated with exactly this layout and has not
            // been freed (layout was still Some).
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            self.ptr = NonNull::dangling();
            self.len = 0;
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

// Buffer owns its storage exclusively; moving it moves the single owner, and
// shared references only ever expose &[T].
unsafe impl<T: Send> Send for Buffer<T> {}
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("allocated", &self.layout.is_some())
            .finish()
    }
}

/// Real-valued array, the storage behind per-particle scalar fields.
pub type RealArray = Buffer<Real>;

/// Index/id array (particle material ids, neighbor lists).
pub type IntArray = Buffer<Int>;

/// Narrow index array for tables where 32 bits suffice.
pub type Int32Array = Buffer<Int32>;

/// Fills the first `n` elements of `a` with an evenly spaced sequence from
/// `start` to `stop`, endpoints inclusive.
///
/// With `n == 1` the single element is the midpoint `0.5 * (start + stop)`;
/// `n == 0` writes nothing.
pub fn linspace(a: &mut RealArray, start: Real, stop: Real, n: usize) -> Result<()> {
    if n > a.len() {
        return Err(validation_error(format!(
            "linspace of {} elements does not fit a buffer of {}",
            n,
            a.len()
        )));
    }

    let out = &mut a.as_mut_slice()[..n];
    if n > 1 {
        let da = (stop - start) / (n - 1) as Real;
        for (i, v) in out.iter_mut().enumerate() {
            *v = start + i as Real * da;
        }
    } else if n == 1 {
        out[0] = 0.5 * (stop + start);
    }
    Ok(())
}

/// Fills a prefix of `a` with a sequence from `start` towards `stop` whose
/// element count is `floor((stop - start) / dx)`, the step re-derived from
/// that count. Returns the number of elements written.
pub fn linspace2(a: &mut RealArray, start: Real, stop: Real, dx: Real) -> Result<usize> {
    let count = ((stop - start) / dx).floor();
    if !count.is_finite() || count < 0.0 {
        return Err(validation_error(format!(
            "increment step {} does not produce a sequence from {} to {}",
            dx, start, stop
        )));
    }

    let n = count as usize;
    if n > a.len() {
        return Err(validation_error(format!(
            "sequence of {} elements does not fit a buffer of {}",
            n,
            a.len()
        )));
    }
    if n == 0 {
        return Ok(0);
    }

    let da = (stop - start) / n as Real;
    for (i, v) in a.as_mut_slice()[..n].iter_mut().enumerate() {
        *v = start + i as Real * da;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::DEFAULT_ALIGNMENT;

    #[test]
    fn test_zeroed_buffer_is_all_zero() {
        let buf = RealArray::zeroed(37).unwrap();
        assert_eq!(buf.len(), 37);
        assert!(buf.as_slice().iter().all(|&v| v == 0.0));

        let ids = IntArray::zeroed(11).unwrap();
        assert!(ids.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_zeroed_buffer_is_aligned() {
        let buf = RealArray::zeroed(64).unwrap();
        let addr = buf.as_slice().as_ptr() as usize;
        assert_eq!(addr % DEFAULT_ALIGNMENT, 0, "allocation must honor the policy alignment");
    }

    #[test]
    fn test_zero_length_buffer_owns_no_storage() {
        let buf = Int32Array::zeroed(0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice(), &[] as &[u32]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut buf = RealArray::zeroed(8).unwrap();
        buf.release();
        assert_eq!(buf.len(), 0);
        buf.release();
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_fill_zero_after_writes() {
        let mut buf = RealArray::zeroed(4).unwrap();
        buf.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        buf.fill_zero();
        assert_eq!(buf.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_copy_from_requires_equal_length() {
        let src = RealArray::zeroed(5).unwrap();
        let mut dst = RealArray::zeroed(4).unwrap();
        assert!(dst.copy_from(&src).is_err());
    }

    #[test]
    fn test_linspace_endpoints() {
        let mut a = RealArray::zeroed(5).unwrap();
        linspace(&mut a, 0.0, 1.0, 5).unwrap();
        assert_eq!(a.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_linspace_single_element_is_midpoint() {
        let mut a = RealArray::zeroed(1).unwrap();
        linspace(&mut a, 2.0, 4.0, 1).unwrap();
        assert_eq!(a.as_slice()[0], 3.0);
    }

    #[test]
    fn test_linspace_rejects_oversized_count() {
        let mut a = RealArray::zeroed(3).unwrap();
        assert!(linspace(&mut a, 0.0, 1.0, 4).is_err());
    }

    #[test]
    fn test_linspace2_count_from_step() {
        let mut a = RealArray::zeroed(16).unwrap();
        let n = linspace2(&mut a, 0.0, 1.0, 0.25).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&a.as_slice()[..4], &[0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_linspace2_rejects_bad_step() {
        let mut a = RealArray::zeroed(4).unwrap();
        assert!(linspace2(&mut a, 0.0, 1.0, 0.0).is_err());
        assert!(linspace2(&mut a, 0.0, 1.0, -0.5).is_err());
    }
}

//! Aligned numeric containers backing a moving-particles semi-implicit (MPS)
//! fluid solver.
//!
//! The crate is the storage layer of a particle simulation: fixed-element-type
//! containers (integer arrays, 1D/2D/3D real-valued vectors, dense matrices)
//! whose heap buffers are allocated at the alignment of the widest SIMD
//! instruction set found on the build host. The surrounding solver supplies
//! element counts (particle counts, grid dimensions) and drives the
//! allocate/zero/copy/arithmetic operations; nothing here allocates behind the
//! caller's back.
//!
//! # Modules
//!
//! - [`align`]: build-time alignment policy (SIMD tier → bytes).
//! - [`buffer`]: owned, contiguous, zero-initialized typed buffers.
//! - [`vector`]: bundles of 1..3 equal-length component buffers.
//! - [`matrix`]: dense column-major matrix with copying sub-block access.
//! - [`kernel`]: elementwise slice kernels (zero, copy, arithmetic,
//!   gather/scatter), sequential and rayon-parallel.
//! - [`error`]: the crate error type; allocation failure is a reported error
//!   value, never a silent crash.

pub mod align;
pub mod buffer;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod vector;

/// Scalar type of every real-valued field sampled at the particles.
pub type Real = f64;

/// Integer kind for sizes, ids and neighbor lists.
pub type Int = u64;

/// Narrow integer kind for tables where 32 bits suffice.
pub type Int32 = u32;

pub use align::{SimdTier, DEFAULT_ALIGNMENT, TIER};
pub use buffer::{linspace, linspace2, Buffer, Int32Array, IntArray, RealArray};
pub use error::{MpsnumError, Result};
pub use matrix::Matrix;
pub use vector::{Axis, Vector1D, Vector2D, Vector3D};

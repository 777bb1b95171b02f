//! Build-time alignment policy.
//!
//! The build script probes the host CPU once and emits exactly one of the
//! cfgs `simd512`, `simd256`, `simd128` or `fallback`; this module maps that
//! cfg to the single alignment-in-bytes constant used by every allocation in
//! the crate. The value is a pure function of build configuration — there is
//! no runtime dispatch, and the absence of SIMD support is a valid tier, not
//! an error.

/// Discrete tranche of vector-register width available on the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdTier {
    /// No usable SIMD instruction set detected.
    None,
    /// 128-bit registers (SSE2/SSE4.1 or NEON).
    Bits128,
    /// 256-bit registers (AVX2).
    Bits256,
    /// 512-bit registers (AVX-512F).
    Bits512,
}

impl SimdTier {
    /// Allocation alignment in bytes for this tier.
    ///
    /// The no-SIMD tier still requests 8 bytes: `Layout` rejects an alignment
    /// of zero, and 8 covers the natural alignment of every element kind the
    /// containers store.
    pub const fn alignment(self) -> usize {
        match self {
            SimdTier::Bits512 => 64,
            SimdTier::Bits256 => 32,
            SimdTier::Bits128 => 16,
            SimdTier::None => 8,
        }
    }

    /// Register width in bits, 0 for the no-SIMD tier.
    pub const fn register_bits(self) -> usize {
        match self {
            SimdTier::Bits512 => 512,
            SimdTier::Bits256 => 256,
            SimdTier::Bits128 => 128,
            SimdTier::None => 0,
        }
    }
}

/// The SIMD tier resolved at build time.
#[cfg(simd512)]
pub const TIER: SimdTier = SimdTier::Bits512;

/// The SIMD tier resolved at build time.
#[cfg(simd256)]
pub const TIER: SimdTier = SimdTier::Bits256;

/// The SIMD tier resolved at build time.
#[cfg(simd128)]
pub const TIER: SimdTier = SimdTier::Bits128;

/// The SIMD tier resolved at build time.
#[cfg(fallback)]
pub const TIER: SimdTier = SimdTier::None;

/// Alignment, in bytes, requested by every buffer allocation in the crate.
pub const DEFAULT_ALIGNMENT: usize = TIER.alignment();

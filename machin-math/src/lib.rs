//! # machin-math
//!
//! Multi-precision limb arithmetic for the machin arccot evaluator.
//!
//! This crate provides [`Accumulator`] — a big fixed-point number held as a
//! vector of 32-bit limbs, most-significant first, split into an integer
//! region and a fractional region. It supports signed delta addition with
//! carry/borrow propagation and in-place base-10 extraction for printing.
//!
//! **Zero external dependencies** — auditable in isolation.

pub mod accumulator;

// Re-export Accumulator for easier access
pub use accumulator::Accumulator;

/// One machine-word digit of a big fixed-point number, base 2^32.
pub type Limb = u32;

/// Unsigned intermediate wide enough for limb × limb products and
/// two-limb division windows.
pub type DoubleLimb = u64;

/// Signed counterpart of [`DoubleLimb`], used for accumulator deltas.
pub type SignedDoubleLimb = i64;

/// Width of a [`Limb`] in bits.
pub const LIMB_BITS: u32 = Limb::BITS;

/// Decimal digits that always fit in one limb: ⌊log₁₀ 2³²⌋.
pub const DECIMAL_DIGITS_PER_LIMB: usize = 9;

/// 10^[`DECIMAL_DIGITS_PER_LIMB`], the per-round multiplier when streaming
/// fractional limbs out as decimal digits.
pub const DECIMAL_CHUNK: Limb = 1_000_000_000;

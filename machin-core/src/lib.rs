//! # machin-core
//!
//! Evaluates Machin-like linear combinations of inverse cotangents,
//!
//! ```text
//! d · (m₁·arccot(a₁) + m₂·arccot(a₂) + …)
//! ```
//!
//! to an arbitrary number of 32-bit limbs of fractional precision, using the
//! Taylor series `arccot(a) = 1/a − 1/(3a³) + 1/(5a⁵) − …` driven by a
//! blocked, streaming long-division scheme.
//!
//! The crate defines:
//! - [`Term`] / [`Formula`]: a validated `(multiplier, argument)` list with
//!   its scale factor
//! - [`Evaluator`]: owns all evaluation state; `run()` performs the
//!   computation
//! - [`DecimalExpansion`]: the rendered integer and fractional digit strings

pub mod evaluator;
pub mod formula;

pub use evaluator::{DecimalExpansion, Evaluator, BLOCK_HEIGHT, BLOCK_WIDTH};
pub use formula::{Formula, FormulaError, Term, ARG_MAX, DEFAULT_PRECISION_LIMBS};

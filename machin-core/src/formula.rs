use machin_math::{DoubleLimb, Limb, LIMB_BITS};
use thiserror::Error;

/// Largest accepted arccot argument: its square must fit in one limb.
pub const ARG_MAX: Limb = (1 << (LIMB_BITS / 2)) - 1;

/// Fractional precision, in limbs, used when no formula is given on the
/// command line.
pub const DEFAULT_PRECISION_LIMBS: usize = 17;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("a formula needs at least one (multiplier, argument) pair")]
    EmptyFormula,
    #[error("scale factor d must be positive")]
    ZeroScale,
    #[error("precision must be at least one limb")]
    ZeroPrecision,
    #[error("argument {0} is too small: the arccot series only decays for arguments >= 2")]
    ArgumentTooSmall(Limb),
    #[error("argument {0} exceeds {ARG_MAX}: its square must fit in one limb")]
    ArgumentTooLarge(Limb),
    #[error("seed {multiplier} * {argument} * {scale} does not fit in two limbs")]
    SeedOverflow {
        multiplier: Limb,
        argument: Limb,
        scale: DoubleLimb,
    },
}

/// One series term `m · arccot(a)`, with `a²` cached for the limb-wise
/// long division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    multiplier: Limb,
    argument: Limb,
    arg_squared: Limb,
}

impl Term {
    pub fn new(multiplier: Limb, argument: Limb) -> Result<Self, FormulaError> {
        if argument < 2 {
            return Err(FormulaError::ArgumentTooSmall(argument));
        }
        if argument > ARG_MAX {
            return Err(FormulaError::ArgumentTooLarge(argument));
        }
        Ok(Self {
            multiplier,
            argument,
            arg_squared: argument * argument,
        })
    }

    pub fn multiplier(&self) -> Limb {
        self.multiplier
    }

    pub fn argument(&self) -> Limb {
        self.argument
    }

    pub fn arg_squared(&self) -> Limb {
        self.arg_squared
    }

    /// The scaled numerator `m · a · d` seeded into the quotient stream.
    pub fn seed(&self, scale: DoubleLimb) -> Result<DoubleLimb, FormulaError> {
        DoubleLimb::from(self.argument)
            .checked_mul(DoubleLimb::from(self.multiplier))
            .and_then(|n| n.checked_mul(scale))
            .ok_or(FormulaError::SeedOverflow {
                multiplier: self.multiplier,
                argument: self.argument,
                scale,
            })
    }
}

/// A validated Machin-like formula `d · Σ mᵢ · arccot(aᵢ)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    scale: DoubleLimb,
    terms: Vec<Term>,
}

impl Formula {
    /// Terms are stored sorted by ascending argument. Larger arguments
    /// decay sooner, and the evaluator retires decayed terms from the tail
    /// of the list, so the longest-lived term has to sit at index 0; the
    /// sum is order-independent, so sorting preserves the value.
    pub fn new(scale: DoubleLimb, mut terms: Vec<Term>) -> Result<Self, FormulaError> {
        if scale == 0 {
            return Err(FormulaError::ZeroScale);
        }
        if terms.is_empty() {
            return Err(FormulaError::EmptyFormula);
        }
        terms.sort_by_key(|term| term.argument());
        Ok(Self { scale, terms })
    }

    pub fn scale(&self) -> DoubleLimb {
        self.scale
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

impl Default for Formula {
    /// `π = 4 · (5·arccot(7) + 4·arccot(68) + 2·arccot(117))`
    fn default() -> Self {
        let terms = [(5, 7), (4, 68), (2, 117)]
            .iter()
            .map(|&(multiplier, argument)| Term {
                multiplier,
                argument,
                arg_squared: argument * argument,
            })
            .collect();
        Self { scale: 4, terms }
    }
}

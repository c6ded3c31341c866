use std::fmt;

use machin_math::{Accumulator, DoubleLimb, Limb, SignedDoubleLimb, LIMB_BITS};

use crate::formula::{Formula, FormulaError, Term};

/// Output limbs produced per outer pass; also the width of the quotient
/// grid and the size of the accumulator's integer region.
pub const BLOCK_WIDTH: usize = 64;

/// Series rows folded per remainder block. Must stay even: the alternating
/// sign restarts positive at every output-limb slot, which is only correct
/// when a whole block covers an even number of series rows.
pub const BLOCK_HEIGHT: usize = 64;

/// Long-division carry state for one column of the block grid.
///
/// `remainders` holds `BLOCK_HEIGHT` rows at a fixed stride of
/// `term_count + 1`: per row, one carry against each term's `a²` followed by
/// one carry against the odd divisor for that series row. The stride never
/// depends on `arg_count`, so raising `arg_count` later reads zeros rather
/// than misaligned state.
#[derive(Debug, Clone)]
struct RemainderBlock {
    arg_count: usize,
    remainders: Vec<Limb>,
}

impl RemainderBlock {
    fn new(term_count: usize, arg_count: usize) -> Self {
        Self {
            arg_count,
            remainders: vec![0; (term_count + 1) * BLOCK_HEIGHT],
        }
    }
}

/// Evaluator for one [`Formula`] at a fixed precision.
///
/// Owns every piece of evaluation state: the fixed-point accumulator, the
/// quotient grid, and the remainder column. Construct, [`run`], then render
/// with [`into_expansion`].
///
/// [`run`]: Evaluator::run
/// [`into_expansion`]: Evaluator::into_expansion
#[derive(Debug)]
pub struct Evaluator {
    terms: Vec<Term>,
    accumulator: Accumulator,
    /// Quotient grid: `BLOCK_WIDTH` rows × term count, row-major. Row `s`
    /// is the per-term dividend state feeding output-limb slot `s` of the
    /// current outer pass.
    quotients: Vec<Limb>,
    remainder_column: Vec<RemainderBlock>,
    block_digit_offset: usize,
    block_divisor_offset: DoubleLimb,
}

impl Evaluator {
    /// Build the evaluator: size the accumulator to
    /// `⌈precision/W⌉·W + W` limbs and seed each term's quotient stream
    /// with `mᵢ·aᵢ·d` split across the bottom two grid rows.
    pub fn new(precision_limbs: usize, formula: &Formula) -> Result<Self, FormulaError> {
        if precision_limbs == 0 {
            return Err(FormulaError::ZeroPrecision);
        }
        let term_count = formula.terms().len();
        let fractional_limbs = precision_limbs.div_ceil(BLOCK_WIDTH) * BLOCK_WIDTH;
        let accumulator = Accumulator::new(fractional_limbs + BLOCK_WIDTH, BLOCK_WIDTH);

        let mut quotients = vec![0; BLOCK_WIDTH * term_count];
        for (i, term) in formula.terms().iter().enumerate() {
            let seed = term.seed(formula.scale())?;
            quotients[(BLOCK_WIDTH - 1) * term_count + i] = seed as Limb;
            quotients[(BLOCK_WIDTH - 2) * term_count + i] = (seed >> LIMB_BITS) as Limb;
        }

        Ok(Self {
            terms: formula.terms().to_vec(),
            accumulator,
            quotients,
            remainder_column: Vec::new(),
            block_digit_offset: 0,
            block_divisor_offset: 1,
        })
    }

    /// Evaluate the series to full precision.
    ///
    /// Each outer pass advances the output by `BLOCK_WIDTH` limbs. The
    /// inner loop walks columns of the block grid for as long as a prior
    /// remainder block needs draining or active terms remain to inject,
    /// then the quotient grid (now fully drained to zero) carries over as
    /// the continuation state of the next pass.
    pub fn run(&mut self) {
        let total_limbs = self.accumulator.len();
        let term_count = self.terms.len();
        while self.block_digit_offset < total_limbs {
            let mut next_arg_count = term_count;
            let mut column = 0;
            self.block_divisor_offset = 1;
            loop {
                if self.remainder_column.len() <= column {
                    self.remainder_column
                        .push(RemainderBlock::new(term_count, next_arg_count));
                }
                let block = &mut self.remainder_column[column];
                block.arg_count = block.arg_count.max(next_arg_count);
                process_block(
                    &mut self.accumulator,
                    &mut self.quotients,
                    block,
                    &self.terms,
                    self.block_digit_offset,
                    self.block_divisor_offset,
                );
                next_arg_count = count_active_terms(&self.quotients, term_count);
                self.block_divisor_offset += 2 * BLOCK_HEIGHT as DoubleLimb;
                column += 1;
                if self.remainder_column.len() <= column && next_arg_count == 0 {
                    break;
                }
            }
            self.block_digit_offset += BLOCK_WIDTH;
        }
    }

    /// Render the accumulated value as decimal digit strings.
    pub fn into_expansion(mut self) -> DecimalExpansion {
        let integer = self.accumulator.extract_integer_decimals();
        let fractional = self.accumulator.extract_fractional_decimals();
        DecimalExpansion {
            integer,
            fractional,
        }
    }
}

/// Fold one column's worth of series rows into the accumulator.
///
/// For every output-limb slot of the current pass: each of the block's
/// `BLOCK_HEIGHT` series rows pulls the next limb of every active term's
/// dividend through a division by `aᵢ²` (carrying the remainder to the next
/// slot), sums the per-term quotients, pulls that sum through the odd
/// divisor for the row, and adds or subtracts the result into a signed
/// delta. The delta lands in the accumulator at the slot's digit offset.
fn process_block(
    accumulator: &mut Accumulator,
    quotients: &mut [Limb],
    block: &mut RemainderBlock,
    terms: &[Term],
    block_digit_offset: usize,
    block_divisor_offset: DoubleLimb,
) {
    let term_count = terms.len();
    debug_assert_eq!(block.remainders.len(), (term_count + 1) * BLOCK_HEIGHT);

    let mut digit_offset = block_digit_offset;
    for q_row in quotients.chunks_mut(term_count) {
        let mut addition = true;
        let mut divisor = block_divisor_offset;
        let mut delta: SignedDoubleLimb = 0;
        for row in block.remainders.chunks_mut(term_count + 1) {
            let (term_rems, odd_rem) = row.split_at_mut(term_count);
            let mut sum: DoubleLimb = 0;
            for i in 0..block.arg_count {
                let n = (DoubleLimb::from(term_rems[i]) << LIMB_BITS)
                    + DoubleLimb::from(q_row[i]);
                let arg_squared = DoubleLimb::from(terms[i].arg_squared());
                // The carried remainder is < a², so the quotient fits one limb.
                q_row[i] = (n / arg_squared) as Limb;
                term_rems[i] = (n % arg_squared) as Limb;
                sum += DoubleLimb::from(q_row[i]);
            }
            sum += DoubleLimb::from(odd_rem[0]) << LIMB_BITS;
            odd_rem[0] = (sum % divisor) as Limb;
            let quotient = (sum / divisor) as SignedDoubleLimb;
            if addition {
                delta += quotient;
            } else {
                delta -= quotient;
            }
            addition = !addition;
            divisor += 2;
        }
        accumulator.accumulate(delta, digit_offset);
        digit_offset += 1;
    }
}

/// Count the active terms: the quotient grid is scanned column by column
/// in term order, and the count is the number of terms from the first one
/// with a live column onward. [`Formula`] keeps terms sorted by ascending
/// argument, so streams decay from the tail of the list and the prefix
/// processed by [`process_block`] always covers every live term. Terms
/// past the count are skipped by future blocks until their stream revives.
fn count_active_terms(quotients: &[Limb], term_count: usize) -> usize {
    for index in 0..term_count {
        let live = quotients[index..]
            .iter()
            .step_by(term_count)
            .any(|&q| q != 0);
        if live {
            return term_count - index;
        }
    }
    0
}

/// Rendered decimal expansion: truncated digits, no rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalExpansion {
    integer: String,
    fractional: String,
}

impl DecimalExpansion {
    /// Integer digits; `"0"` when the integer part is zero.
    pub fn integer(&self) -> &str {
        &self.integer
    }

    /// Fractional digits, emitted in nine-digit chunks; empty when the
    /// fraction is zero.
    pub fn fractional(&self) -> &str {
        &self.fractional
    }
}

impl fmt::Display for DecimalExpansion {
    /// `I.FFF…`, with the decimal point omitted for an empty fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.integer)?;
        if !self.fractional.is_empty() {
            write!(f, ".{}", self.fractional)?;
        }
        Ok(())
    }
}

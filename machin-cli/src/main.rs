use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use machin_core::{Evaluator, Formula, Term, DEFAULT_PRECISION_LIMBS};

/// Compute d * (m1*arccot(a1) + m2*arccot(a2) + ...) to arbitrary precision.
///
/// With no positional arguments, evaluates the built-in formula
/// pi = 4 * (5*arccot(7) + 4*arccot(68) + 2*arccot(117)) at the default
/// precision. Digits are truncated, not rounded.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of 32-bit limbs of fractional precision
    precision: Option<usize>,

    /// Scale factor d applied to the whole arccot sum
    d: Option<u64>,

    /// Alternating multiplier/argument pairs: m1 a1 m2 a2 ...
    terms: Vec<u32>,

    /// Print evaluation timing to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            if is_usage_error {
                return ExitCode::from(1);
            }
            // --help and --version land here
            return ExitCode::SUCCESS;
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let (precision, formula) = build_formula(&args)?;
    let mut evaluator = Evaluator::new(precision, &formula)?;

    let start = Instant::now();
    evaluator.run();
    let evaluated = start.elapsed();

    let start = Instant::now();
    let expansion = evaluator.into_expansion();
    let rendered = start.elapsed();

    println!("{expansion}");
    if args.stats {
        eprintln!(
            "{} limbs evaluated in {evaluated:?}, rendered in {rendered:?}",
            precision
        );
    }
    Ok(())
}

/// Assemble the formula from the positional arguments, falling back to the
/// built-in default when none are given.
fn build_formula(args: &Args) -> Result<(usize, Formula)> {
    let Some(precision) = args.precision else {
        return Ok((DEFAULT_PRECISION_LIMBS, Formula::default()));
    };
    let scale = args
        .d
        .context("scale factor d is required when a precision is given")?;
    if args.terms.is_empty() {
        bail!("at least one multiplier/argument pair is required");
    }
    if args.terms.len() % 2 != 0 {
        bail!(
            "multiplier {} is missing its argument",
            args.terms[args.terms.len() - 1]
        );
    }
    let terms = args
        .terms
        .chunks(2)
        .map(|pair| Term::new(pair[0], pair[1]))
        .collect::<Result<Vec<_>, _>>()?;
    let formula = Formula::new(scale, terms)?;
    Ok((precision, formula))
}

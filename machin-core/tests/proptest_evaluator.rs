use machin_core::{Evaluator, Formula, Term};
use proptest::prelude::*;

fn evaluate(precision_limbs: usize, formula: &Formula) -> machin_core::DecimalExpansion {
    let mut evaluator = Evaluator::new(precision_limbs, formula).unwrap();
    evaluator.run();
    evaluator.into_expansion()
}

fn small_formula() -> impl Strategy<Value = Formula> {
    // Arguments are drawn in arbitrary order; `Formula::new` sorts them
    // ascending, which term retirement in the evaluator depends on.
    let term = (1u32..=50, 2u32..=500).prop_map(|(m, a)| Term::new(m, a).unwrap());
    (1u64..=50, prop::collection::vec(term, 1..=3))
        .prop_map(|(scale, terms)| Formula::new(scale, terms).unwrap())
}

// Property 1: evaluation is deterministic.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn prop_determinism(formula in small_formula()) {
        let first = evaluate(1, &formula);
        let second = evaluate(1, &formula);
        prop_assert_eq!(first, second);
    }
}

// Property 2: the leading digits match a double-precision reference of
// d · Σ mᵢ · arccot(aᵢ), well inside f64 accuracy.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn prop_leading_digits_match_f64_reference(formula in small_formula()) {
        let reference = formula.scale() as f64
            * formula
                .terms()
                .iter()
                .map(|t| f64::from(t.multiplier()) * (1.0 / f64::from(t.argument())).atan())
                .sum::<f64>();

        let expansion = evaluate(1, &formula);
        let printed: f64 = format!(
            "{}.{}",
            expansion.integer(),
            &expansion.fractional()[..12]
        )
        .parse()
        .unwrap();

        let tolerance = reference.abs() * 1e-9 + 1e-9;
        prop_assert!(
            (printed - reference).abs() <= tolerance,
            "printed {} vs reference {}",
            printed,
            reference
        );
    }
}

// Property 3: raising the precision only extends the expansion; the
// digits both runs can vouch for are identical.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]
    #[test]
    fn prop_precision_extends_the_expansion(formula in small_formula()) {
        let short = evaluate(1, &formula);
        let long = evaluate(65, &formula);
        prop_assert_eq!(short.integer(), long.integer());

        let reliable = short.fractional().len().saturating_sub(18);
        prop_assert_eq!(
            &short.fractional()[..reliable],
            &long.fractional()[..reliable]
        );
    }
}

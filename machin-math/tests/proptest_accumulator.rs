use machin_math::{Accumulator, DoubleLimb, Limb, SignedDoubleLimb, LIMB_BITS};
use proptest::prelude::*;

/// Reconstruct the value of a three-limb accumulator (96 bits, fits i128).
fn as_i128(limbs: &[Limb]) -> i128 {
    limbs
        .iter()
        .fold(0i128, |acc, &limb| (acc << LIMB_BITS) + i128::from(limb))
}

// Property 1: accumulate agrees with wide reference arithmetic at the
// least significant limb, for any delta that keeps the value non-negative.
proptest! {
    #[test]
    fn prop_accumulate_matches_i128_reference(
        limbs in prop::collection::vec(any::<Limb>(), 3),
        delta in any::<SignedDoubleLimb>(),
    ) {
        let before = as_i128(&limbs);
        let after = before + i128::from(delta);
        prop_assume!(after >= 0 && after < 1i128 << 96);

        let mut acc = Accumulator::from_limbs(limbs, 3);
        acc.accumulate(delta, 2);
        prop_assert_eq!(as_i128(&acc.limbs), after);
    }
}

// Property 2: two deltas commute whenever both orders stay non-negative.
proptest! {
    #[test]
    fn prop_accumulate_commutes(
        limbs in prop::collection::vec(any::<Limb>(), 3),
        a in any::<SignedDoubleLimb>(),
        b in any::<SignedDoubleLimb>(),
    ) {
        let in_range = |v: i128| v >= 0 && v < 1i128 << 96;
        let before = as_i128(&limbs);
        prop_assume!(in_range(before + i128::from(a)));
        prop_assume!(in_range(before + i128::from(b)));
        prop_assume!(in_range(before + i128::from(a) + i128::from(b)));

        let mut ab = Accumulator::from_limbs(limbs.clone(), 3);
        ab.accumulate(a, 2);
        ab.accumulate(b, 2);

        let mut ba = Accumulator::from_limbs(limbs, 3);
        ba.accumulate(b, 2);
        ba.accumulate(a, 2);

        prop_assert_eq!(ab.limbs, ba.limbs);
    }
}

// Property 3: integer extraction is the ordinary decimal rendering of the
// limb vector read as one big base-2^32 integer.
proptest! {
    #[test]
    fn prop_integer_extraction_matches_u128(
        limbs in prop::collection::vec(any::<Limb>(), 1..=3),
    ) {
        let value = limbs
            .iter()
            .fold(0u128, |acc, &limb| (acc << LIMB_BITS) + u128::from(limb));
        let integer_limbs = limbs.len();
        let mut acc = Accumulator::from_limbs(limbs, integer_limbs);
        prop_assert_eq!(acc.extract_integer_decimals(), value.to_string());
    }
}

// Property 4: a single fractional limb prints as floor(limb * 10^9 / 2^32)
// zero-padded to nine digits.
proptest! {
    #[test]
    fn prop_single_fractional_limb_digits(limb in 1..=Limb::MAX) {
        let mut acc = Accumulator::from_limbs(vec![0, limb, 0], 1);
        let digits = acc.extract_fractional_decimals();

        let scaled = DoubleLimb::from(limb) * 1_000_000_000 >> LIMB_BITS;
        let expected = format!("{scaled:09}");
        prop_assert!(digits.starts_with(&expected));
        prop_assert_eq!(digits.len() % 9, 0);
    }
}

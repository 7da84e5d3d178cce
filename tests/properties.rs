//! Property tests for the quote functions.

use dex_calc::{
    ceil_div, credit_subsidy, liquidity_minted_for_base_in, remove_liquidity_payout,
    swap_base_for_token, swap_token_for_base, token_required_for_base_deposit, Decimal,
};
use proptest::prelude::*;

const PLACES: u32 = 20;

fn amount() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000_000
}

proptest! {
    #[test]
    fn base_for_token_is_below_frictionless_rate(a in amount(), b in amount(), c in amount()) {
        let output = swap_base_for_token(a, b, c).unwrap();
        let frictionless = (Decimal::from(a) * Decimal::from(c))
            .checked_div(&Decimal::from(b), PLACES)
            .unwrap();
        prop_assert!(output < frictionless);
    }

    #[test]
    fn base_for_token_is_monotonic(a in 1u64..1_000_000_000, step in 1u64..1_000_000, b in amount(), c in amount()) {
        let smaller = swap_base_for_token(a, b, c).unwrap();
        let larger = swap_base_for_token(a + step, b, c).unwrap();
        prop_assert!(larger > smaller);
    }

    #[test]
    fn token_for_base_is_monotonic(a in 1u64..1_000_000_000, step in 1u64..1_000_000, b in amount(), c in amount()) {
        let smaller = swap_token_for_base(a, b, c).unwrap();
        let larger = swap_token_for_base(a + step, b, c).unwrap();
        prop_assert!(larger > smaller);
    }

    #[test]
    fn non_positive_inputs_are_rejected(bad in -1_000_000i64..=0, b in amount(), c in amount()) {
        prop_assert_eq!(swap_base_for_token(bad, b, c), None);
        prop_assert_eq!(swap_base_for_token(b, bad, c), None);
        prop_assert_eq!(swap_token_for_base(b, c, bad), None);
        prop_assert_eq!(token_required_for_base_deposit(bad, b, c), None);
        prop_assert_eq!(liquidity_minted_for_base_in(bad, b, c), None);
        prop_assert_eq!(remove_liquidity_payout(b, bad, b, c), None);
    }

    #[test]
    fn ceil_div_bounds(x in 1u64..=u64::MAX, y in 1u64..=1_000_000_000) {
        let (x_dec, y_dec) = (Decimal::from(x), Decimal::from(y));
        let quotient = ceil_div(&x_dec, &y_dec).unwrap();
        prop_assert!(&y_dec * &quotient >= x_dec);

        let below = &y_dec * (quotient - Decimal::one());
        if x % y == 0 {
            // exact quotients are bumped by one
            prop_assert_eq!(below, x_dec);
        } else {
            prop_assert!(below < x_dec);
        }
    }

    #[test]
    fn full_burn_returns_both_reserves(total in amount(), b in amount(), c in amount()) {
        let quote = remove_liquidity_payout(total, total, b, c).unwrap();
        prop_assert_eq!(quote.base_out, credit_subsidy(&Decimal::from(b)));
        prop_assert_eq!(quote.token_out, Decimal::from(c));
    }

    #[test]
    fn quotes_are_idempotent(a in amount(), b in amount(), c in amount()) {
        prop_assert_eq!(swap_base_for_token(a, b, c), swap_base_for_token(a, b, c));
        prop_assert_eq!(swap_token_for_base(a, b, c), swap_token_for_base(a, b, c));
        prop_assert_eq!(remove_liquidity_payout(a, b, b, c), remove_liquidity_payout(a, b, b, c));
    }

    #[test]
    fn decimal_string_roundtrip(mantissa in any::<i128>(), scale in 0u32..30) {
        let value = Decimal::new(mantissa.into(), scale);
        let parsed: Decimal = value.to_string().parse().unwrap();
        prop_assert_eq!(parsed, value);
    }
}

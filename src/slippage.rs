use num_bigint::BigInt;
use tracing::trace;

use crate::{
    state::Token,
    utils::{quote_or_none, IntoDecimal},
    Decimal, ErrorCode,
};

/// Apply slippage tolerance to get the minimum acceptable output
///
/// # Arguments
/// * `token` - Asset the amount is denominated in
/// * `display_value` - Amount in whole tokens, as shown to the user
/// * `slippage_percent` - Tolerance in percent, e.g. `0.5`
///
/// # Returns
/// `floor(units - units * slippage_percent / 100)` with
/// `units = floor(display_value * scale)`. Negative once the tolerance
/// reaches 100%; callers guard against that. `None` only for malformed input.
pub fn minimum_acceptable(
    token: Token,
    display_value: impl IntoDecimal,
    slippage_percent: impl IntoDecimal,
) -> Option<BigInt> {
    quote_or_none(
        "minimum_acceptable",
        slippage_floor(token, display_value, slippage_percent),
    )
}

fn slippage_floor(
    token: Token,
    display_value: impl IntoDecimal,
    slippage_percent: impl IntoDecimal,
) -> Result<BigInt, ErrorCode> {
    let display_value = display_value.into_decimal()?;
    let slippage_percent = slippage_percent.into_decimal()?;

    let units = Decimal::from((&display_value * &token.slippage_scale()).floor());
    // units * slippage / 100, exact
    let delta = (&units * &slippage_percent).scaled_down(2);
    let minimum = (units - delta).floor();

    trace!(?token, %display_value, %slippage_percent, %minimum, "slippage floor");
    Ok(minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slippage() {
        // 1_500_000 - 7_500
        assert_eq!(minimum_acceptable(Token::Base, "1.5", "0.5"), Some(BigInt::from(1_492_500)));
    }

    #[test]
    fn test_paired_slippage_floors_twice() {
        // floor(123456.789) = 123456; 123456 - 1234.56 = 122221.44
        assert_eq!(
            minimum_acceptable(Token::Paired, "0.00123456789", 1u64),
            Some(BigInt::from(122_221))
        );
    }

    #[test]
    fn test_liquidity_token_uses_paired_scale() {
        assert_eq!(
            minimum_acceptable(Token::LiquidityToken, "2", "10"),
            Some(BigInt::from(180_000_000))
        );
    }

    #[test]
    fn test_base_slippage_floors_units_first() {
        // floor(1.9) = 1; 1 - 0.1 = 0.9 floors to 0
        assert_eq!(
            minimum_acceptable(Token::Base, "0.0000019", "10"),
            Some(BigInt::from(0))
        );
    }

    #[test]
    fn test_zero_slippage_keeps_floor() {
        assert_eq!(
            minimum_acceptable(Token::Base, "0.0000019", 0u64),
            Some(BigInt::from(1))
        );
    }

    #[test]
    fn test_slippage_above_full_goes_negative() {
        assert_eq!(minimum_acceptable(Token::Base, "1", "150"), Some(BigInt::from(-500_000)));
        // 1 - 1.5 = -0.5 floors to -1
        assert_eq!(minimum_acceptable(Token::Base, "0.000001", "150"), Some(BigInt::from(-1)));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(minimum_acceptable(Token::Base, "one", "0.5"), None);
        assert_eq!(minimum_acceptable(Token::Paired, "1", "half"), None);
    }
}

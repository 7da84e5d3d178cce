//! Swap operations for DEX
//!
//! Outputs are quoted in the output asset's integer units and left
//! unrounded; flooring to whole units is up to the caller.

use tracing::trace;

use crate::{
    utils::{credit_subsidy_with, ensure_positive, quote_or_none, IntoDecimal},
    AmmConfig, Decimal, ErrorCode,
};

/// Calculate the paired-token output for a base-asset input
///
/// # Arguments
/// * `base_in` - Base-asset units sent to the pool
/// * `base_pool` - Raw base-asset pool balance, before the subsidy credit
/// * `token_pool` - Paired-token pool balance
///
/// # Returns
/// The output amount, or `None` if any input is non-positive or malformed
pub fn swap_base_for_token(
    base_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Option<Decimal> {
    swap_base_for_token_with(&AmmConfig::default(), base_in, base_pool, token_pool)
}

pub fn swap_base_for_token_with(
    amm_config: &AmmConfig,
    base_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Option<Decimal> {
    quote_or_none(
        "swap_base_for_token",
        base_to_token_output(amm_config, base_in, base_pool, token_pool),
    )
}

/// Calculate the base-asset output for a paired-token input
///
/// # Arguments
/// * `token_in` - Paired-token units sent to the pool
/// * `base_pool` - Raw base-asset pool balance, before the subsidy credit
/// * `token_pool` - Paired-token pool balance
///
/// # Returns
/// The output amount, or `None` if any input is non-positive or malformed
pub fn swap_token_for_base(
    token_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Option<Decimal> {
    swap_token_for_base_with(&AmmConfig::default(), token_in, base_pool, token_pool)
}

pub fn swap_token_for_base_with(
    amm_config: &AmmConfig,
    token_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Option<Decimal> {
    quote_or_none(
        "swap_token_for_base",
        token_to_base_output(amm_config, token_in, base_pool, token_pool),
    )
}

fn base_to_token_output(
    amm_config: &AmmConfig,
    base_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Result<Decimal, ErrorCode> {
    amm_config.validate()?;
    let base_in = base_in.into_decimal()?;
    let base_pool = base_pool.into_decimal()?;
    let token_pool = token_pool.into_decimal()?;
    ensure_positive(&[&base_in, &base_pool, &token_pool])?;

    let base_pool = credit_subsidy_with(amm_config, &base_pool);
    let multiplier = amm_config.fee_and_burn_multiplier();

    // base_in * token_pool * 998001 / (base_pool * 1000000 + base_in * 998001)
    let numerator = &base_in * &token_pool * &multiplier;
    let denominator = &base_pool * amm_config.multiplier_denominator() + &base_in * &multiplier;
    let output = numerator.checked_div(&denominator, amm_config.division_places)?;

    trace!(%base_in, %base_pool, %token_pool, %output, "base to token");
    Ok(output)
}

fn token_to_base_output(
    amm_config: &AmmConfig,
    token_in: impl IntoDecimal,
    base_pool: impl IntoDecimal,
    token_pool: impl IntoDecimal,
) -> Result<Decimal, ErrorCode> {
    amm_config.validate()?;
    let token_in = token_in.into_decimal()?;
    let base_pool = base_pool.into_decimal()?;
    let token_pool = token_pool.into_decimal()?;
    ensure_positive(&[&token_in, &base_pool, &token_pool])?;

    let base_pool = credit_subsidy_with(amm_config, &base_pool);

    // token_in * base_pool * 998001 / (token_pool * 1000000 + token_in * 999000)
    // The denominator charges the fee but not the burn, unlike base to token.
    let numerator = &token_in * &base_pool * amm_config.fee_and_burn_multiplier();
    let denominator = &token_pool * amm_config.multiplier_denominator()
        + &token_in * amm_config.fee_only_multiplier();
    let output = numerator.checked_div(&denominator, amm_config.division_places)?;

    trace!(%token_in, %base_pool, %token_pool, %output, "token to base");
    Ok(output)
}

use borsh::{BorshDeserialize, BorshSerialize};
use num_bigint::BigInt;

use crate::{
    constants::{
        BASE_DECIMALS, BURN_RATE, DIVISION_PLACES, FEE_DENOMINATOR, LIQUIDITY_TOKEN_DECIMALS,
        LIQUIDITY_TOKEN_DISPLAY_PLACES, PAIRED_DECIMALS, SUBSIDY_CREDIT, TRADE_FEE_RATE,
    },
    liquidity, slippage, swap,
    utils::{credit_subsidy_with, IntoDecimal},
    Decimal, ErrorCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AmmConfig {
    pub trade_fee_rate: u64, // 10^3 = 100%
    pub burn_rate: u64,      // 10^3 = 100%, charged on top of the trade fee
    pub subsidy_credit: u64, // base-asset units
    pub division_places: u32,
}

impl Default for AmmConfig {
    fn default() -> Self {
        Self {
            trade_fee_rate: TRADE_FEE_RATE,
            burn_rate: BURN_RATE,
            subsidy_credit: SUBSIDY_CREDIT,
            division_places: DIVISION_PLACES,
        }
    }
}

impl AmmConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.trade_fee_rate > FEE_DENOMINATOR {
            return Err(ErrorCode::InvalidConfig(format!(
                "trade fee rate {} exceeds {}",
                self.trade_fee_rate, FEE_DENOMINATOR
            )));
        }
        if self.burn_rate > FEE_DENOMINATOR {
            return Err(ErrorCode::InvalidConfig(format!(
                "burn rate {} exceeds {}",
                self.burn_rate, FEE_DENOMINATOR
            )));
        }
        Ok(())
    }

    /// Input share kept after both fee and burn, over `FEE_DENOMINATOR^2`.
    /// 999 * 999 = 998001 for the reference pool.
    pub fn fee_and_burn_multiplier(&self) -> Decimal {
        let kept_after_fee = FEE_DENOMINATOR.saturating_sub(self.trade_fee_rate);
        let kept_after_burn = FEE_DENOMINATOR.saturating_sub(self.burn_rate);
        Decimal::from(kept_after_fee * kept_after_burn)
    }

    /// Input share kept after the fee alone, over `FEE_DENOMINATOR^2`.
    /// 999 * 1000 = 999000 for the reference pool.
    pub fn fee_only_multiplier(&self) -> Decimal {
        Decimal::from(FEE_DENOMINATOR.saturating_sub(self.trade_fee_rate) * FEE_DENOMINATOR)
    }

    pub fn multiplier_denominator(&self) -> Decimal {
        Decimal::from(FEE_DENOMINATOR * FEE_DENOMINATOR)
    }
}

/// Asset an amount is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub enum Token {
    Base,
    Paired,
    LiquidityToken,
}

impl Token {
    /// Integer units per whole token, as a power of ten.
    pub fn decimals(&self) -> u32 {
        match self {
            Token::Base => BASE_DECIMALS,
            Token::Paired => PAIRED_DECIMALS,
            Token::LiquidityToken => LIQUIDITY_TOKEN_DECIMALS,
        }
    }

    pub fn display_places(&self) -> u32 {
        match self {
            Token::Base => BASE_DECIMALS,
            Token::Paired => PAIRED_DECIMALS,
            Token::LiquidityToken => LIQUIDITY_TOKEN_DISPLAY_PLACES,
        }
    }

    /// Units per display amount used by the slippage floor. Only the base
    /// asset differs; every other token uses the paired-token scale.
    pub fn slippage_scale(&self) -> Decimal {
        match self {
            Token::Base => Decimal::from(10u64.pow(BASE_DECIMALS)),
            Token::Paired | Token::LiquidityToken => Decimal::from(10u64.pow(PAIRED_DECIMALS)),
        }
    }

    pub fn to_display(&self, units: &Decimal) -> Decimal {
        units.scaled_down(self.decimals())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum SwapDirection {
    BaseToToken,
    TokenToBase,
}

impl SwapDirection {
    pub fn input_token(&self) -> Token {
        match self {
            SwapDirection::BaseToToken => Token::Base,
            SwapDirection::TokenToBase => Token::Paired,
        }
    }

    pub fn output_token(&self) -> Token {
        match self {
            SwapDirection::BaseToToken => Token::Paired,
            SwapDirection::TokenToBase => Token::Base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct SwapQuote {
    pub output_token: Token,
    /// Unrounded output in the output token's integer units
    pub output_amount: Decimal,
}

impl SwapQuote {
    /// Floor on the output, in integer units, that the swap must still
    /// deliver with `slippage_percent` tolerance.
    pub fn minimum_output(&self, slippage_percent: impl IntoDecimal) -> Option<BigInt> {
        let display = self.output_token.to_display(&self.output_amount);
        slippage::minimum_acceptable(self.output_token, display, slippage_percent)
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct LiquidityQuote {
    /// Amount of the other asset that keeps the deposit balanced
    pub counterpart_amount: Decimal,
    pub liquidity_minted: Decimal,
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct BurnQuote {
    pub base_out: Decimal,
    pub token_out: Decimal,
}

/// On-chain pool snapshot, in integer units.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct PoolState {
    pub base_pool: Decimal,
    pub token_pool: Decimal,
    pub liquidity_supply: Decimal,
}

impl PoolState {
    pub fn new(
        base_pool: impl IntoDecimal,
        token_pool: impl IntoDecimal,
        liquidity_supply: impl IntoDecimal,
    ) -> Result<Self, ErrorCode> {
        let pool = Self {
            base_pool: base_pool.into_decimal()?,
            token_pool: token_pool.into_decimal()?,
            liquidity_supply: liquidity_supply.into_decimal()?,
        };
        if pool.base_pool.is_negative()
            || pool.token_pool.is_negative()
            || pool.liquidity_supply.is_negative()
        {
            return Err(ErrorCode::InvalidInput);
        }
        Ok(pool)
    }

    pub fn adjusted_base_pool(&self, amm_config: &AmmConfig) -> Decimal {
        credit_subsidy_with(amm_config, &self.base_pool)
    }

    pub fn quote_swap(
        &self,
        amm_config: &AmmConfig,
        direction: SwapDirection,
        amount_in: impl IntoDecimal,
    ) -> Option<SwapQuote> {
        let output_amount = match direction {
            SwapDirection::BaseToToken => swap::swap_base_for_token_with(
                amm_config,
                amount_in,
                &self.base_pool,
                &self.token_pool,
            ),
            SwapDirection::TokenToBase => swap::swap_token_for_base_with(
                amm_config,
                amount_in,
                &self.base_pool,
                &self.token_pool,
            ),
        }?;

        Some(SwapQuote {
            output_token: direction.output_token(),
            output_amount,
        })
    }

    /// Paired tokens required alongside `base_in`, and the liquidity minted.
    pub fn quote_base_deposit(
        &self,
        amm_config: &AmmConfig,
        base_in: impl IntoDecimal,
    ) -> Option<LiquidityQuote> {
        let base_in = base_in.into_decimal().ok()?;
        let counterpart_amount = liquidity::token_required_for_base_deposit_with(
            amm_config,
            &base_in,
            &self.base_pool,
            &self.token_pool,
        )?;
        let liquidity_minted = liquidity::liquidity_minted_for_base_in_with(
            amm_config,
            &base_in,
            &self.base_pool,
            &self.liquidity_supply,
        )?;

        Some(LiquidityQuote {
            counterpart_amount,
            liquidity_minted,
        })
    }

    /// Base asset required alongside `token_in`, and the liquidity that base
    /// amount mints.
    pub fn quote_token_deposit(
        &self,
        amm_config: &AmmConfig,
        token_in: impl IntoDecimal,
    ) -> Option<LiquidityQuote> {
        let counterpart_amount = liquidity::base_required_for_token_deposit_with(
            amm_config,
            token_in,
            &self.base_pool,
            &self.token_pool,
        )?;
        let liquidity_minted = liquidity::liquidity_minted_for_base_in_with(
            amm_config,
            &counterpart_amount,
            &self.base_pool,
            &self.liquidity_supply,
        )?;

        Some(LiquidityQuote {
            counterpart_amount,
            liquidity_minted,
        })
    }

    pub fn quote_burn(
        &self,
        amm_config: &AmmConfig,
        liquidity_burned: impl IntoDecimal,
    ) -> Option<BurnQuote> {
        liquidity::remove_liquidity_payout_with(
            amm_config,
            liquidity_burned,
            &self.liquidity_supply,
            &self.base_pool,
            &self.token_pool,
        )
    }
}

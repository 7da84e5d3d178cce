//! DEX Calc Library
//!
//! This library provides mathematical functions for a constant-product
//! exchange pool: swap quotes, liquidity deposits and liquidity withdrawals,
//! computed with arbitrary-precision decimals.

pub mod swap;
pub mod liquidity;
pub mod slippage;
pub mod state;
pub mod errors;
pub mod utils;
pub mod constants;
pub mod decimal;
// Re-export functions for convenience
pub use swap::{swap_base_for_token, swap_token_for_base};
pub use liquidity::{
    base_required_for_token_deposit, liquidity_minted_for_base_in, remove_liquidity_payout,
    token_required_for_base_deposit,
};
pub use slippage::minimum_acceptable;
pub use state::{AmmConfig, BurnQuote, LiquidityQuote, PoolState, SwapDirection, SwapQuote, Token};
pub use errors::ErrorCode;
pub use decimal::Decimal;
pub use utils::*;
pub use constants::SUBSIDY_CREDIT;

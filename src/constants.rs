/// Base-asset units credited to the pool by the contract's liquidity subsidy.
pub const SUBSIDY_CREDIT: u64 = 2_500_000;

/// 10^3 = 100% for trade fee and burn rates.
pub const FEE_DENOMINATOR: u64 = 1_000;

/// 0.1% trading fee
pub const TRADE_FEE_RATE: u64 = 1;

/// 0.1% burn, applied separately from the trading fee
pub const BURN_RATE: u64 = 1;

/// Fractional digits kept by decimal division.
pub const DIVISION_PLACES: u32 = 20;

pub const BASE_DECIMALS: u32 = 6;
pub const PAIRED_DECIMALS: u32 = 8;
pub const LIQUIDITY_TOKEN_DECIMALS: u32 = 0;

pub const LIQUIDITY_TOKEN_DISPLAY_PLACES: u32 = 2;

use dex_calc::{minimum_acceptable, AmmConfig, PoolState, SwapDirection, Token};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() {
    init_logging();

    // Example usage of the DEX calc functions on a sample snapshot
    let amm_config = AmmConfig::default();
    let pool = match PoolState::new(10_000_000u64, 5_000_000u64, 1_000u64) {
        Ok(pool) => pool,
        Err(err) => {
            error!(%err, "invalid pool snapshot");
            return;
        }
    };

    // Example 1: Quote a swap in each direction
    for direction in [SwapDirection::BaseToToken, SwapDirection::TokenToBase] {
        match pool.quote_swap(&amm_config, direction, 1_000_000u64) {
            Some(quote) => info!(
                ?direction,
                output = %quote.output_amount,
                minimum = ?quote.minimum_output("0.5"),
                "swap quote"
            ),
            None => error!(?direction, "swap quote rejected"),
        }
    }

    // Example 2: Deposit liquidity
    match pool.quote_base_deposit(&amm_config, 1_000_000u64) {
        Some(quote) => info!(
            counterpart = %quote.counterpart_amount,
            minted = %quote.liquidity_minted,
            "deposit quote"
        ),
        None => error!("deposit quote rejected"),
    }

    // Example 3: Withdraw liquidity
    match pool.quote_burn(&amm_config, 50u64) {
        Some(quote) => info!(base_out = %quote.base_out, token_out = %quote.token_out, "burn quote"),
        None => error!("burn quote rejected"),
    }

    // Example 4: Slippage floor for a displayed amount
    info!(minimum = ?minimum_acceptable(Token::Paired, "0.0000037", "1"), "slippage floor");
}
